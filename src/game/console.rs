//! Where the adventure reads answers and prints narration

use crate::GameError;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Print a line of narration
    fn say(&mut self, text: &str);

    /// Show a prompt and read one answer, trimmed. End of input is
    /// [`GameError::InputClosed`].
    fn ask(&mut self, prompt: &str) -> Result<String, GameError>;
}

/// Terminal console on stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn say(&mut self, text: &str) {
        println!("{text}");
    }

    fn ask(&mut self, prompt: &str) -> Result<String, GameError> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

/// Console fed from a fixed list of answers; keeps a transcript
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub transcript: Vec<String>,
}

impl ScriptedConsole {
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

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn said(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    fn ask(&mut self, prompt: &str) -> Result<String, GameError> {
        self.transcript.push(prompt.to_string());
        let answer = self.answers.pop_front().ok_or(GameError::InputClosed)?;
        Ok(answer.trim().to_string())
    }
}
