//! GitHub Actions output channel.
//!
//! Informational lines go out as-is; failure is reported with the `error`
//! workflow command. The exit status is decided by the caller.

use std::io::{self, Stdout, Write};

pub const BOLD: &str = "\u{1b}[1m";
pub const UNDERLINE: &str = "\u{1b}[4m";

/// Line-oriented writer for the job log
#[derive(Debug)]
pub struct ActionsOutput<W> {
    writer: W,
}

impl ActionsOutput<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ActionsOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)?;
        self.writer.flush()
    }

    /// Mark the job failed with `message` as an error annotation
    pub fn set_failed(&mut self, message: &str) -> io::Result<()> {
        self.issue_command("error", message)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn issue_command(&mut self, command: &str, message: &str) -> io::Result<()> {
        writeln!(self.writer, "::{}::{}", command, escape_data(message))?;
        self.writer.flush()
    }
}

/// Escape workflow command data so it stays on one line
pub fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(output: ActionsOutput<Vec<u8>>) -> String {
        String::from_utf8(output.into_inner()).expect("utf-8 output")
    }

    #[test]
    fn info_writes_one_line() {
        let mut output = ActionsOutput::new(Vec::new());
        output.info("ApiDOM lint openapi.yaml").unwrap();
        output.info("").unwrap();
        assert_eq!(written(output), "ApiDOM lint openapi.yaml\n\n");
    }

    #[test]
    fn set_failed_issues_error_command() {
        let mut output = ActionsOutput::new(Vec::new());
        output.set_failed("").unwrap();
        assert_eq!(written(output), "::error::\n");
    }

    #[test]
    fn command_data_is_escaped() {
        assert_eq!(escape_data("100% broken\r\nsee log"), "100%25 broken%0D%0Asee log");

        let mut output = ActionsOutput::new(Vec::new());
        output.set_failed("two\nlines").unwrap();
        assert_eq!(written(output), "::error::two%0Alines\n");
    }
}
