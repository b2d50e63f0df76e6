//! Operator console: status lines and interactive questions.
//!
//! The trait seam keeps the resolution engine testable and lets embedders
//! swap the terminal for a scripted console.

use crate::error::ParamError;
use owo_colors::OwoColorize;
use std::collections::VecDeque;
use std::io::IsTerminal;

/// Narrow interface over console I/O used during a merge run.
pub trait Console {
    /// Whether an operator can answer questions. Non-interactive runs
    /// fall back to dist defaults instead of prompting.
    fn is_interactive(&self) -> bool;

    /// Print an informational status line.
    fn status(&mut self, message: &str);

    /// Ask the operator a question, suggesting `default` as the answer.
    /// Blocks until an answer is supplied.
    fn ask(&mut self, prompt: &str, default: &str) -> Result<String, ParamError>;
}

/// Terminal console backed by dialoguer.
pub struct TermConsole {
    interactive: bool,
}

impl TermConsole {
    /// `no_interaction` forces prompt-free resolution even on a TTY;
    /// a non-TTY stdin disables interaction regardless.
    pub fn new(no_interaction: bool) -> Self {
        Self {
            interactive: !no_interaction && std::io::stdin().is_terminal(),
        }
    }
}

impl Console for TermConsole {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn status(&mut self, message: &str) {
        println!("{}", message.green());
    }

    fn ask(&mut self, prompt: &str, default: &str) -> Result<String, ParamError> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()
            .map_err(|e| {
                ParamError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to get operator input: {}", e),
                ))
            })
    }
}

/// Scripted console for tests and non-terminal embeddings: answers come
/// from a queue, status lines are recorded.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    interactive: bool,
    answers: VecDeque<String>,
    /// Status lines emitted during the run, in order.
    pub lines: Vec<String>,
    /// Prompts asked during the run, in order.
    pub asked: Vec<String>,
}

impl ScriptedConsole {
    /// Non-interactive console; asking is a logic error.
    pub fn non_interactive() -> Self {
        Self::default()
    }

    /// Interactive console answering questions from `answers` in order.
    /// An empty answer means "accept the suggested default".
    pub fn with_answers(answers: Vec<&str>) -> Self {
        Self {
            interactive: true,
            answers: answers.into_iter().map(String::from).collect(),
            lines: Vec::new(),
            asked: Vec::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn status(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn ask(&mut self, prompt: &str, default: &str) -> Result<String, ParamError> {
        self.asked.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(answer) if answer.is_empty() => Ok(default.to_string()),
            Some(answer) => Ok(answer),
            None => Err(ParamError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("No scripted answer left for \"{}\"", prompt),
            ))),
        }
    }
}
