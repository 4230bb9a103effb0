//! Interactive yes/no confirmation

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::storage::Confirm;

/// Asks on `output` and reads one line of `input`; only answers starting with `y` accept
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// Prompts on the process's own terminal
pub fn terminal() -> PromptConfirm<io::StdinLock<'static>, io::Stdout> {
    PromptConfirm::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{}", question).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .context("Failed to read confirmation")?;

        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('y')
}
