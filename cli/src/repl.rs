use std::io::{BufRead, Write};

use wordindex::{FileSource, Session};

use crate::{
    command::{Command, MENU},
    render::Renderer,
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Dispatches menu commands against a session.
///
/// Nothing a user types ends the loop except `quit` or end of input: parse errors and
/// query failures are rendered back and the next line is read.
pub struct Repl<'a> {
    session: &'a mut Session,
    renderer: Renderer,
}

impl<'a> Repl<'a> {
    pub fn new(session: &'a mut Session, renderer: Renderer) -> Repl<'a> {
        Repl { session, renderer }
    }

    pub fn execute(&mut self, command: &Command) -> Result<(String, Flow)> {
        let output = match command {
            Command::Load(files) => {
                let report = self.session.build(files.iter().map(FileSource::new));
                self.renderer.build_report(&report)?
            }
            Command::Search(term) => {
                let outcome = self.session.search(term)?;
                self.renderer.search(term, &outcome)?
            }
            Command::And(left, right) => {
                let outcome = self.session.search_and(left, right)?;
                self.renderer
                    .search(&format!("{} AND {}", left, right), &outcome)?
            }
            Command::Top(k) => self.renderer.top_terms(&self.session.top_terms(*k)?)?,
            Command::Stats => self.renderer.stats(&self.session.stats()?)?,
            Command::Docs => self.renderer.documents(self.session.documents())?,
            Command::Config => self.renderer.config(self.session.config())?,
            Command::Reset => {
                self.session.reset();
                self.renderer.message("Index released.")
            }
            Command::Help => self.renderer.message(MENU),
            Command::Quit => return Ok((self.renderer.message("Goodbye."), Flow::Quit)),
        };
        Ok((output, Flow::Continue))
    }

    /// Parse and run one line. Failures come back rendered, never as errors.
    pub fn execute_line(&mut self, line: &str) -> (Option<String>, Flow) {
        let command = match Command::parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return (None, Flow::Continue),
            Err(err) => return (Some(self.renderer.error(&err)), Flow::Continue),
        };

        tracing::debug!("[Repl] running '{}'", command);
        match self.execute(&command) {
            Ok((output, flow)) => (Some(output), flow),
            Err(err) => {
                tracing::debug!("[Repl] '{}' failed: {}", command, err);
                (Some(self.renderer.error(&err)), Flow::Continue)
            }
        }
    }

    /// Read commands until `quit` or end of input. With `interactive` set the menu and a
    /// prompt are printed.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
        interactive: bool,
    ) -> Result<()> {
        if interactive {
            writeln!(output, "{}", MENU)?;
        }
        let mut lines = input.lines();
        loop {
            if interactive {
                write!(output, "> ")?;
                output.flush()?;
            }
            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            let (reply, flow) = self.execute_line(&line);
            if let Some(reply) = reply {
                writeln!(output, "{}", reply)?;
            }
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }
}
