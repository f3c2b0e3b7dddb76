//! Console seam: message printing and confirmation prompts.

use std::collections::VecDeque;

use dialoguer::Confirm;

use crate::error::CliResult;

/// Where dispatcher output and confirmation prompts go.
pub trait Console {
    /// Print one message line.
    fn echo(&mut self, message: &str);

    /// Ask a yes/no question and block for the answer.
    fn confirm(&mut self, prompt: &str) -> CliResult<bool>;
}

/// Terminal console: stdout plus an interactive `dialoguer` prompt.
///
/// The prompt defaults to "no" so an accidental Enter never confirms a
/// mutating operation.
#[derive(Debug, Default)]
pub struct TermConsole;

impl Console for TermConsole {
    fn echo(&mut self, message: &str) {
        println!("{message}");
    }

    fn confirm(&mut self, prompt: &str) -> CliResult<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

/// Scripted console for tests and non-interactive callers: records every
/// echoed line and answers prompts from a queue (empty queue declines).
#[derive(Debug, Default)]
pub struct BufferConsole {
    pub lines: Vec<String>,
    pub answers: VecDeque<bool>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            lines: Vec::new(),
            answers: answers.into_iter().collect(),
        }
    }

    /// All output so far as one string, for containment assertions.
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }
}

impl Console for BufferConsole {
    fn echo(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn confirm(&mut self, prompt: &str) -> CliResult<bool> {
        self.lines.push(format!("? {prompt}"));
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
