//! Yes/no approval before files are processed

use std::io::{self, BufRead, Write};

/// Trait for approving a file or a batch
pub trait Approver {
    /// Ask a yes/no question; `true` means go ahead
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Approves everything without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl Approver for AutoApprove {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Asks on `output` and reads one line from `input`.
///
/// Only `y` (any case) approves. Anything else, including end of input,
/// declines.
pub struct InteractiveApprover<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveApprover<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl InteractiveApprover<io::StdinLock<'static>, io::Stdout> {
    /// Approver on the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Approver for InteractiveApprover<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{} (y/n): ", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }

        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}
