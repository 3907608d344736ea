//! Yes/no confirmation before a candidate is removed.

use crate::signals;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Something that can answer "delete this?".
pub trait Confirm {
    /// Ask `question`; `Ok(true)` only on an affirmative answer.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Asks the operator on stdin.
pub struct StdinConfirm;

impl StdinConfirm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinConfirm {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{} (y/n) ", question)?;
        stdout.flush()?;
        drop(stdout);

        let mut input = String::new();
        let read = {
            let _guard = signals::PromptGuard::enter();
            io::stdin().lock().read_line(&mut input)?
        };

        // EOF counts as "no"
        if read == 0 {
            return Ok(false);
        }
        Ok(is_affirmative(&input))
    }
}

/// Replays canned answers and remembers what was asked.
///
/// Questions beyond the scripted answers are declined.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
