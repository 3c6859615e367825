//! Turns a flower breeding table into the JSON document served to the front-end.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flower_genetics::prelude::*;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "transform-data")]
#[command(about = "Convert a flower genetics CSV table into a linked JSON document")]
#[command(version)]
struct Args {
    /// Input table, must end in .csv
    input: PathBuf,

    /// Output document, overwritten if it exists
    output: PathBuf,

    /// Field delimiter of the input table
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Accept rows with more or fewer fields than the header
    #[arg(long)]
    flexible: bool,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print the short content digest of the written document on stdout
    #[arg(long)]
    print_digest: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !args.delimiter.is_ascii() {
        error!(delimiter = %args.delimiter, "delimiter must be a single ascii character");
        return ExitCode::FAILURE;
    }

    let mut builder = CsvBuilder::new();
    builder
        .delimiter(args.delimiter as u8)
        .flexible(args.flexible);
    let options = WriteOptions {
        pretty: args.pretty,
    };

    match flower_genetics::write_to_file(&args.input, &args.output, &builder, &options) {
        Ok(written) => {
            if args.print_digest {
                println!("{}", written.digest);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
