use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::PathBuf;

use clap::Parser;
use ply::mem::{InMemorySink, InMemorySource};
use ply::{FormatType, RecordReader, RecordWriter};

#[derive(Debug, Parser)]
#[command(name = "ply-sanitize", author, version, about = "Round-trips a Stanford PLY file through the writer", long_about = None)]
struct Args {
    #[arg(short, long, help = "Increases the output of the program", action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(short = 't', long, help = "Output encoding", default_value = "ascii")]
    format: String,
    #[arg(help = "Path of the file to sanitize")]
    input: PathBuf,
    #[arg(help = "Path to write the canonicalized file to")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let format = match args.format.as_str() {
        "ascii" => FormatType::Ascii,
        "binary_little_endian" => FormatType::BinaryLittleEndian,
        "binary_big_endian" => FormatType::BinaryBigEndian,
        other => return Err(anyhow::anyhow!("unrecognized format: {other}")),
    };

    let mut bytes = Vec::new();
    File::open(&args.input)?.read_to_end(&mut bytes)?;

    // First pass: the header alone, to learn the declared schema before
    // streaming the (potentially much larger) payload.
    let (_header, _offset) = ply::parse_header(&bytes)?;

    // Second pass: stream the full file into an in-memory sink, then hand
    // the accumulated schema and rows to the writer.
    let mut sink = InMemorySink::default();
    RecordReader::read_all_from_slice(&bytes, &mut sink)?;
    let header = sink.header.expect("start() is always called before handle()");

    if args.verbose > 0 {
        println!("{}: {} elements", args.input.display(), header.elements.len());
    }

    let mut source = InMemorySource::new(header, sink.rows);
    let out = BufWriter::new(File::create(&args.output)?);
    match format {
        FormatType::Ascii => RecordWriter::write_ascii(out, &mut source)?,
        FormatType::BinaryLittleEndian => RecordWriter::write_binary_le(out, &mut source)?,
        FormatType::BinaryBigEndian => RecordWriter::write_binary_be(out, &mut source)?,
    }

    Ok(())
}
