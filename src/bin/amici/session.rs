//! Command loop over a datafile or standard input

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::{command::Command, registry::Registry};

/// Prompt printed before echoes and usage errors
const PROMPT: &str = "Amici> ";

/// Where commands are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A datafile; commands are not echoed
    File,
    /// Standard input; every accepted command is echoed
    Interactive,
}

/// A registry plus the stream its responses are written to
#[derive(Debug)]
pub struct Session<W> {
    /// The people known to this session
    registry: Registry,
    /// Response stream
    out: W,
    /// Set once `quit` has been read
    finished: bool,
}

impl<W: Write> Session<W> {
    /// Starts a session with an empty registry
    pub fn new(out: W) -> Self {
        Self { registry: Registry::new(), out, finished: false }
    }

    /// Returns true once `quit` has been read
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Executes every line of `input` until it ends or `quit` is read.
    ///
    /// # Errors
    ///
    /// Propagates read errors from `input` and write errors from the output.
    pub fn run<R: BufRead>(&mut self, input: R, source: Source) -> io::Result<()> {
        let mut executed: usize = 0;
        for line in input.lines() {
            self.execute(&line?, source)?;
            executed = executed.saturating_add(1);
            if self.finished {
                break;
            }
        }
        info!("read {executed} lines from {source:?} input");
        Ok(())
    }

    /// Ends the session, echoing the final `quit`, and hands back the
    /// output stream
    ///
    /// # Errors
    ///
    /// Propagates write errors from the output.
    pub fn quit(mut self) -> io::Result<W> {
        writeln!(self.out, "{PROMPT}{}", Command::Quit.echo())?;
        debug!("closing session with {} people", self.registry.len());
        self.registry.reset();
        self.out.flush()?;
        Ok(self.out)
    }

    /// Executes a single command line
    fn execute(&mut self, line: &str, source: Source) -> io::Result<()> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(usage) => return writeln!(self.out, "{PROMPT}{usage}"),
        };
        debug!("executing {command:?}");

        match command {
            Command::Quit => {
                self.finished = true;
                return Ok(());
            }
            Command::Unknown => {
                write!(self.out, "{PROMPT}")?;
                return self.out.flush();
            }
            _ => {}
        }

        if let Some(usage) = command.surplus_usage() {
            writeln!(self.out, "{PROMPT}{usage}")?;
        }
        if source == Source::Interactive {
            writeln!(self.out, "{PROMPT}{}", command.echo())?;
        }

        let response = match command {
            Command::Add { first, last, handle } => {
                self.registry.add(first, last, handle).map(|()| None)
            }
            Command::Friend(a, b) => self.registry.befriend(a, b).map(Some),
            Command::Unfriend(a, b) => self.registry.unfriend(a, b).map(Some),
            Command::Print(handle) => self.registry.describe(handle).map(Some),
            Command::Size(handle) => self.registry.size_of(handle).map(Some),
            Command::Stats { .. } => Ok(Some(self.registry.stats())),
            Command::Init { .. } => {
                self.registry.reset();
                Ok(Some("System re-initialized".to_string()))
            }
            Command::Dump => {
                self.registry.dump(&mut self.out)?;
                Ok(None)
            }
            Command::Quit | Command::Unknown => Ok(None),
        };

        match response {
            Ok(Some(text)) => writeln!(self.out, "{text}"),
            Ok(None) => Ok(()),
            Err(err) => writeln!(self.out, "error: {err}"),
        }
    }
}
