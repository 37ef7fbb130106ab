//! `amici`: a small social-graph shell built on `hashtab::Table`.
//!
//! Commands are read from an optional datafile, then from standard input,
//! until `quit` or end of input.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

/// Module implementing command tokenizing and echo
mod command;
/// Module implementing the people table and friendships
mod registry;
/// Module implementing the command loop
mod session;

use session::{Session, Source};

/// Command line of the `amici` binary
#[derive(Parser, Debug)]
#[command(name = "amici", version, about = "Tracks people and their friendships", long_about = None)]
struct Args {
    /// Commands to run, without echo, before reading standard input
    datafile: Option<PathBuf>,

    /// Log table activity to standard error
    #[arg(short, long)]
    verbose: bool,
}

/// Opens the datafile, naming its path if that fails
fn open_datafile(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("{}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Runs the datafile, then standard input, against one session
fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::builder().filter_level(log_level).init();

    let mut session = Session::new(io::stdout().lock());

    if let Some(path) = &args.datafile {
        let reader = open_datafile(path)?;
        info!("running datafile {}", path.display());
        session
            .run(reader, Source::File)
            .with_context(|| format!("failed while running {}", path.display()))?;
    }

    if !session.is_finished() {
        session.run(io::stdin().lock(), Source::Interactive).context("failed reading standard input")?;
    }

    let stdout = session.quit().context("failed writing to standard output")?;
    drop(stdout);
    Ok(())
}
