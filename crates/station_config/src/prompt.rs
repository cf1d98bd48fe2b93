//! Interactive prompt primitives.
//!
//! All terminal interaction goes through the [`Prompter`] trait so the
//! reconcilers can be driven by a script in tests. Every re-ask loop lives in
//! this module: the helpers only return once they hold a valid answer, or
//! `None` when the user pressed enter to accept the shown default.

use std::collections::VecDeque;

use crate::drivers::DriverRegistry;
use crate::errors::{StationError, StationResult};
use crate::reconcile::Altitude;
use crate::registry::PLACEHOLDER_DOMAIN;

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;

/// A line-oriented conversation with the user.
pub trait Prompter {
    /// Shows an informational line.
    fn say(&mut self, message: &str);

    /// Shows `question` and returns the line typed in reply.
    fn ask(&mut self, question: &str) -> StationResult<String>;
}

/// A [`Prompter`] that replays canned answers and records the conversation.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
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

    /// Everything said and asked so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Number of answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }

    fn ask(&mut self, question: &str) -> StationResult<String> {
        self.transcript.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| StationError::Prompt(format!("No scripted answer for '{question}'")))
    }
}

fn question(prompt: &str, default: Option<&str>) -> String {
    match default {
        Some(default) => format!("{prompt} [{default}]: "),
        None => format!("{prompt}: "),
    }
}

/// Asks `question` until `parse` accepts the trimmed answer.
///
/// The rejection reason is shown before asking again. An empty answer
/// returns `None`.
pub fn prompt_validated<T, F>(
    prompter: &mut dyn Prompter,
    question: &str,
    parse: F,
) -> StationResult<Option<T>>
where
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        let answer = prompter.ask(question)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        match parse(answer) {
            Ok(value) => return Ok(Some(value)),
            Err(reason) => prompter.say(&reason),
        }
    }
}

/// Asks for a free-form string, optionally restricted to `options`.
pub fn prompt_with_options(
    prompter: &mut dyn Prompter,
    prompt: &str,
    default: Option<&str>,
    options: Option<&[&str]>,
) -> StationResult<Option<String>> {
    let text = match options {
        Some(options) => question(&format!("{prompt} ({})", options.join(", ")), default),
        None => question(prompt, default),
    };
    prompt_validated(prompter, &text, |answer| match options {
        Some(options) if !options.contains(&answer) => {
            Err(format!("Please choose one of: {}", options.join(", ")))
        }
        _ => Ok(answer.to_string()),
    })
}

/// Parses `text` as a number within `[low, high]`, returning the trimmed text.
///
/// The text rather than the parsed number is returned so the stored value
/// keeps the precision it was typed with.
pub fn parse_in_range(text: &str, low: f64, high: f64) -> Result<String, String> {
    let text = text.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| format!("'{text}' is not a number"))?;
    if !value.is_finite() || value < low || value > high {
        return Err(format!("{text} is not between {low} and {high}"));
    }
    Ok(text.to_string())
}

/// Asks for a number within `[low, high]`.
pub fn prompt_with_limits(
    prompter: &mut dyn Prompter,
    prompt: &str,
    default: &str,
    low: f64,
    high: f64,
) -> StationResult<Option<String>> {
    prompt_validated(prompter, &question(prompt, Some(default)), |answer| {
        parse_in_range(answer, low, high)
    })
}

/// Asks a yes/no question. An empty answer returns `None`.
pub fn y_or_n(prompter: &mut dyn Prompter, question: &str) -> StationResult<Option<bool>> {
    loop {
        let answer = prompter.ask(question)?.trim().to_lowercase();
        match answer.as_str() {
            "" => return Ok(None),
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            _ => prompter.say("Please answer 'y' or 'n'."),
        }
    }
}

/// Asks for an altitude as `<value>, <unit>`.
pub fn prompt_for_altitude(
    prompter: &mut dyn Prompter,
    default: &str,
) -> StationResult<Option<Altitude>> {
    prompter.say("");
    prompter.say("Specify altitude, with units 'foot' or 'meter'.  For example:");
    prompter.say("35, foot");
    prompter.say("12, meter");
    prompt_validated(prompter, &question("altitude", Some(default)), |answer| {
        answer.parse::<Altitude>()
    })
}

/// Shows a numbered menu of the registered drivers and returns the module
/// of the one chosen.
pub fn prompt_for_driver(
    prompter: &mut dyn Prompter,
    registry: &DriverRegistry,
    default: &str,
) -> StationResult<Option<String>> {
    let modules: Vec<&str> = registry.drivers().map(|info| info.module.as_str()).collect();

    prompter.say("");
    prompter.say("Installed drivers include:");
    for (i, info) in registry.drivers().enumerate() {
        prompter.say(&format!(
            "{:>2}) {:<15} {:<28} {}",
            i + 1,
            info.display_name(),
            format!("({})", info.module),
            info.version
        ));
    }

    let default_choice = modules
        .iter()
        .position(|module| *module == default)
        .map(|i| (i + 1).to_string());
    let text = question("choose a driver", default_choice.as_deref());

    prompt_validated(prompter, &text, |answer| {
        answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| modules.get(i))
            .map(|module| module.to_string())
            .ok_or_else(|| format!("Please choose a number between 1 and {}", modules.len()))
    })
}

/// Asks for the station URL until a usable one is given.
///
/// An empty answer accepts `default`; placeholder URLs are refused.
pub fn prompt_for_station_url(
    prompter: &mut dyn Prompter,
    default: Option<&str>,
) -> StationResult<String> {
    loop {
        prompter.say("");
        prompter.say("Now give a unique URL for your station. A Weather Underground ");
        prompter.say("URL such as https://www.wunderground.com/dashboard/pws/KORPORT12 will do.");
        let url = prompt_with_options(prompter, "Unique URL", default, None)?
            .or_else(|| default.map(str::to_string));
        match url {
            Some(url) if url.contains(PLACEHOLDER_DOMAIN) => prompter.say("Unique please!"),
            Some(url) if !url.trim().is_empty() => return Ok(url),
            _ => {}
        }
    }
}
