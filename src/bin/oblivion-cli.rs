use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use oblivion::{command, OrderedList};
use tracing_subscriber::EnvFilter;

/// Run ordered list operations (INC, REM, SUC, IMP, EXT), one per line.
#[derive(Debug, Parser)]
#[command(name = "oblivion-cli", version)]
struct Cli {
    /// Read operations from standard input and answer on standard output.
    #[arg(short = 'i', long, conflicts_with = "file", required_unless_present = "file")]
    interactive: bool,

    /// Read operations from FILE and write answers to FILE.out.
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut list = OrderedList::new();

    if let Some(path) = cli.file {
        let input = File::open(&path)
            .with_context(|| format!("failed to open the file '{}'", path.display()))?;
        let mut out_path = path.into_os_string();
        out_path.push(".out");
        let out_path = PathBuf::from(out_path);
        let output = File::create(&out_path)
            .with_context(|| format!("failed to open the file '{}'", out_path.display()))?;
        command::run(&mut list, BufReader::new(input), BufWriter::new(output))?;
    } else if cli.interactive {
        command::run(&mut list, io::stdin().lock(), io::stdout().lock())?;
    }
    Ok(())
}
