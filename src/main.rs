use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use huffpack::logging::{setup_logging, LogFormat};
use huffpack::{Container, HuffmanCodec, HuffmanError};

const EXTENSION: &str = "huff";

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Codec(#[from] HuffmanError),
}

/// Huffman compress and decompress files.
#[derive(Debug, Parser)]
#[clap(version, about)]
struct CliArgs {
    /// How log lines are rendered.
    #[clap(long, value_enum, default_value_t, env = "HUFFPACK_LOG_FORMAT", global = true)]
    log_format: LogFormat,
    #[clap(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Compress a file into a container.
    Compress(TransformArgs),
    /// Restore a file from a container.
    Decompress(TransformArgs),
    /// Print the header, tree and code table of a container.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
struct TransformArgs {
    /// File to read.
    input: PathBuf,
    /// File to write. Derived from the input name when omitted.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Container to inspect.
    input: PathBuf,
    /// Also print the tree node by node.
    #[clap(long)]
    tree: bool,
}

fn compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == EXTENSION) {
        return input.with_extension("");
    }
    let mut name = input.as_os_str().to_owned();
    name.push(".out");
    PathBuf::from(name)
}

fn open(path: &Path) -> Result<BufReader<File>, Error> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::Open { path: path.to_owned(), source })
}

fn create(path: &Path) -> Result<BufWriter<File>, Error> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| Error::Create { path: path.to_owned(), source })
}

fn compress(args: TransformArgs) -> Result<(), Error> {
    let output = args.output.unwrap_or_else(|| compressed_path(&args.input));
    let report = HuffmanCodec::encode_from_file(open(&args.input)?, create(&output)?)?;
    tracing::info!(input = %args.input.display(), output = %output.display(), %report, "wrote container");
    Ok(())
}

fn decompress(args: TransformArgs) -> Result<(), Error> {
    let output = args.output.unwrap_or_else(|| decompressed_path(&args.input));
    let report = HuffmanCodec::decode_from_file(open(&args.input)?, create(&output)?)?;
    tracing::info!(input = %args.input.display(), output = %output.display(), %report, "restored file");
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<(), Error> {
    let bytes = std::fs::read(&args.input).map_err(|source| Error::Read {
        path: args.input.clone(),
        source,
    })?;
    let container = Container::parse(&bytes)?;
    let codec = HuffmanCodec::new(container.tree.clone());
    let tree = codec.tree();

    println!("container:      {} bytes", bytes.len());
    println!("pad length:     {}", container.pad_length);
    println!("tree:           {} bytes", container.tree_len);
    println!("leaves:         {}", tree.leaf_count());
    println!("internal nodes: {}", tree.internal_count());
    println!("depth:          {}", tree.depth());
    println!("payload:        {} bytes, {} bits", container.payload.len(), container.payload_bits());
    println!();
    for (symbol, code) in codec.code_table().iter() {
        println!("{symbol:>3} {:>8?}  {code}", symbol as char);
    }
    if args.tree {
        println!();
        print!("{tree}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    setup_logging(args.log_format);

    let result = match args.command {
        CliCommand::Compress(args) => compress(args),
        CliCommand::Decompress(args) => decompress(args),
        CliCommand::Inspect(args) => inspect(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "command failed");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
