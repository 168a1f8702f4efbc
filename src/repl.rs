use std::io::{self, BufRead, Write};

use bplus_tree::BPlusTree;
use log::warn;

use crate::{
    meta_commands::{handle_meta_command, MetaCommandError, MetaCommandResult},
    statements::{execute_statement, prepare_statement, Key},
};

pub struct REPL<R> {
    input: R,
}

impl<R: BufRead> REPL<R> {
    pub fn new(input: R) -> Self {
        REPL { input }
    }

    /// Reads the next trimmed line, `None` once input is exhausted.
    pub fn read_line(&mut self) -> Result<Option<String>, io::Error> {
        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        let buffer = buffer.trim().to_string();
        Ok(Some(buffer))
    }

    /// Runs the prompt until `.exit` or end of input.
    pub fn run<W: Write>(&mut self, tree: &mut BPlusTree<Key>, out: &mut W) -> io::Result<()> {
        loop {
            write!(out, "dockie> ")?;
            out.flush()?;
            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(()),
            };
            if line.is_empty() {
                continue;
            }

            if line.starts_with('.') {
                match handle_meta_command(&line, tree) {
                    Ok(MetaCommandResult::Exit) => return Ok(()),
                    Ok(MetaCommandResult::Output(text)) => writeln!(out, "{}", text)?,
                    Err(MetaCommandError::UnrecognizedCommand) => {
                        warn!("Unrecognized meta command {}", line);
                        writeln!(out, "Unrecognized command '{}'", line)?
                    }
                }
                continue;
            }

            match prepare_statement(&line) {
                Ok(statement) => writeln!(out, "{}", execute_statement(statement, tree))?,
                Err(err) => writeln!(out, "{}", err)?,
            }
        }
    }
}
