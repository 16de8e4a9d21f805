use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use ply::{NullSink, RecordReader};

#[derive(Debug, Parser)]
#[command(name = "ply-validate", author, version, about = "Validates that a file parses as Stanford PLY", long_about = None)]
struct Args {
    #[arg(short, long, help = "Increases the output of the program", action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(help = "Path of the file to validate")]
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if args.verbose > 0 {
        println!("{}:", args.path.display());
    }

    let file = File::open(&args.path)?;
    let mut sink = NullSink;
    match RecordReader::read_all(file, &mut sink) {
        Ok(()) => {
            println!("OK");
            Ok(())
        }
        Err(err) => Err(anyhow::anyhow!("{}", err)),
    }
}
