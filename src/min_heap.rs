/// Array-backed binary min-heap.
///
/// Elements are compared with `Ord`; callers that need a stable order
/// among equal keys must fold a tiebreaker into the key themselves.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

#[derive(Debug)]
pub enum HeapErr {
    KeyError(usize, usize),
    HeapUnderflow,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { elements: vec![] }
    }

    pub fn heap_size(&self) -> usize {
        self.elements.len()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

impl<T: Ord> MinHeap<T> {
    /// Heapify `source` in place, O(n).
    pub fn build(source: Vec<T>) -> Result<Self, HeapErr> {
        let mut heap = MinHeap { elements: source };
        let n = heap.heap_size();
        for i in (0..n / 2).rev() {
            heap.min_heapify(i)?;
        }
        Ok(heap)
    }

    #[cfg(test)]
    fn valid_min_heap(&self) -> bool {
        (1..self.heap_size()).all(|i| self.elements[Self::parent(i)] <= self.elements[i])
    }

    /// Sift the element at `i` down until both children are larger.
    pub fn min_heapify(&mut self, mut i: usize) -> Result<(), HeapErr> {
        let n = self.heap_size();
        if i >= n {
            return Err(HeapErr::KeyError(i, n));
        }

        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return Ok(());
            }

            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let mut i = self.heap_size() - 1;
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[p] <= self.elements[i] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    pub fn extract_min(&mut self) -> Result<T, HeapErr> {
        if self.elements.is_empty() {
            return Err(HeapErr::HeapUnderflow);
        }
        let result = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.min_heapify(0)?;
        }
        Ok(result)
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_ascending_order() {
        let mut heap = MinHeap::build(vec![9, 3, 7, 1, 8, 2, 6]).unwrap();
        assert!(heap.valid_min_heap());
        heap.insert(5);
        heap.insert(0);
        assert!(heap.valid_min_heap());

        let mut drained = Vec::new();
        while heap.heap_size() > 0 {
            drained.push(heap.extract_min().unwrap());
        }
        assert_eq!(drained, vec![0, 1, 2, 3, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn ties_resolve_through_the_key() {
        let mut heap = MinHeap::new();
        heap.insert((4, 2));
        heap.insert((4, 0));
        heap.insert((4, 1));
        assert_eq!(heap.extract_min().unwrap(), (4, 0));
        assert_eq!(heap.extract_min().unwrap(), (4, 1));
        assert_eq!(heap.extract_min().unwrap(), (4, 2));
    }

    #[test]
    fn empty_heap_underflows() {
        let mut heap: MinHeap<u8> = MinHeap::default();
        assert!(matches!(heap.extract_min(), Err(HeapErr::HeapUnderflow)));
        assert!(matches!(heap.min_heapify(0), Err(HeapErr::KeyError(0, 0))));
    }
}
