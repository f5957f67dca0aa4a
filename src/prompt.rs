//! Line-oriented operator console used by every interactive prompt.
//!
//! Decisions are computed by pure functions in `logic`; this module only
//! moves text between the operator and those functions. Tests and
//! non-interactive callers use [`ScriptedConsole`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Operator input/output channel.
pub trait Console: Send {
    /// Print one line of output.
    fn show(&mut self, line: &str);

    /// What: Print `question` and read one line of free-form answer.
    ///
    /// Output:
    /// - The answer without the trailing newline. End of input reads as an
    ///   empty answer.
    ///
    /// # Errors
    /// - Returns `Err` when the underlying reader fails.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Console backed by the process stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn show(&mut self, line: &str) {
        println!("{line}");
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        print!("{question}");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Console that replays canned answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    /// Every line shown and every question asked, in order.
    pub transcript: Vec<String>,
}

impl ScriptedConsole {
    /// What: Create a console that answers prompts from `answers` in order.
    ///
    /// Details:
    /// - Once the answers run out every further question reads as empty input.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Whether any shown line contains `needle`.
    #[must_use]
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|l| l.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn show(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.transcript.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
