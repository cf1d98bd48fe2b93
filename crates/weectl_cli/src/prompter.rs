//! Terminal-backed prompter.

use std::io::{self, BufRead, Write};

use station_config::{Prompter, StationError, StationResult};

/// Asks questions on stdout and reads answers from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn say(&mut self, message: &str) {
        println!("{message}");
    }

    fn ask(&mut self, question: &str) -> StationResult<String> {
        print!("{question}");
        io::stdout().flush()?;

        let mut answer = String::new();
        let read = io::stdin().lock().read_line(&mut answer)?;
        if read == 0 {
            return Err(StationError::Prompt(
                "Input closed before an answer was given".to_string(),
            ));
        }
        Ok(answer.trim().to_string())
    }
}
