//! Line-based terminal prompt engine.
//!
//! Questions are written to stderr; answers are read one line at a time, so
//! the prompter works the same on a TTY and on piped input.

use console::{style, Term};
use nightwatch_init::{Answer, Choice, InitError, InitResult, Prompt, Prompter, QuestionKind};
use std::io::BufRead;

/// Prompter reading answers line by line
#[derive(Debug)]
pub struct TerminalPrompter<R> {
    term: Term,
    input: R,
    use_color: bool,
}

impl TerminalPrompter<std::io::StdinLock<'static>> {
    /// Prompter over the process stdin
    #[must_use]
    pub fn stdin(use_color: bool) -> Self {
        Self::new(std::io::stdin().lock(), use_color)
    }
}

impl<R: BufRead> TerminalPrompter<R> {
    /// Prompter over any line source
    #[must_use]
    pub fn new(input: R, use_color: bool) -> Self {
        Self {
            term: Term::stderr(),
            input,
            use_color,
        }
    }

    fn show(&self, prompt: &Prompt<'_>) {
        let marker = if self.use_color {
            style("?").green().bold().to_string()
        } else {
            "?".to_string()
        };
        let hint = default_hint(prompt.kind(), &prompt.choices, prompt.default.as_ref());
        let _ = self
            .term
            .write_line(&format!("{marker} {}{hint}", prompt.message()));
        for (i, choice) in prompt.choices.iter().enumerate() {
            let _ = self.term.write_line(&format!("  {}) {}", i + 1, choice.label));
        }
    }

    fn complain(&self, message: &str) {
        let text = if self.use_color {
            style(message).red().to_string()
        } else {
            message.to_string()
        };
        let _ = self.term.write_line(&format!(">> {text}"));
    }

    fn read_line(&mut self) -> InitResult<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InitError::prompt(e.to_string()))?;
        if read == 0 {
            return Err(InitError::prompt("input closed before all questions were answered"));
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead> Prompter for TerminalPrompter<R> {
    fn ask(&mut self, prompt: &Prompt<'_>) -> InitResult<Answer> {
        loop {
            self.show(prompt);
            let line = self.read_line()?;
            let answer = parse_response(
                prompt.kind(),
                &line,
                &prompt.choices,
                prompt.default.as_ref(),
            )
            .and_then(|answer| prompt.validate(&answer).map(|()| answer));
            match answer {
                Ok(answer) => return Ok(answer),
                Err(message) => self.complain(&message),
            }
        }
    }
}

/// Turn one typed line into an answer.
///
/// An empty line takes the default. Choices are picked by 1-based number
/// or by id; multi-selects take a comma separated list.
pub fn parse_response(
    kind: QuestionKind,
    line: &str,
    choices: &[Choice],
    default: Option<&Answer>,
) -> Result<Answer, String> {
    let line = line.trim();
    if line.is_empty() {
        return match (kind, default) {
            (_, Some(answer)) => Ok(answer.clone()),
            (QuestionKind::Input, None) => Ok(Answer::Text(String::new())),
            (QuestionKind::MultiSelect, None) => Ok(Answer::Choices(Vec::new())),
            _ => Err("Please enter a value.".to_string()),
        };
    }

    match kind {
        QuestionKind::Input => Ok(Answer::Text(line.to_string())),
        QuestionKind::Confirm => match line.to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(Answer::Flag(true)),
            "n" | "no" => Ok(Answer::Flag(false)),
            _ => Err("Please answer y or n.".to_string()),
        },
        QuestionKind::Select => pick(line, choices).map(|id| Answer::Choice(id.to_string())),
        QuestionKind::MultiSelect => line
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| pick(part, choices).map(ToString::to_string))
            .collect::<Result<Vec<_>, _>>()
            .map(|mut ids| {
                let mut seen = Vec::with_capacity(ids.len());
                ids.retain(|id| {
                    let fresh = !seen.contains(id);
                    seen.push(id.clone());
                    fresh
                });
                Answer::Choices(ids)
            }),
    }
}

fn pick<'c>(token: &str, choices: &'c [Choice]) -> Result<&'c str, String> {
    if let Ok(n) = token.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| choices.get(i))
            .map(|c| c.id)
            .ok_or_else(|| format!("Enter a number between 1 and {}.", choices.len()));
    }
    choices
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(token) || c.label.eq_ignore_ascii_case(token))
        .map(|c| c.id)
        .ok_or_else(|| format!("'{token}' is not one of the options."))
}

/// The `[default]` suffix shown after a question
fn default_hint(kind: QuestionKind, choices: &[Choice], default: Option<&Answer>) -> String {
    let position = |id: &str| {
        choices
            .iter()
            .position(|c| c.id == id)
            .map(|i| (i + 1).to_string())
    };
    let shown = match (kind, default) {
        (QuestionKind::Confirm, Some(Answer::Flag(true))) => Some("Y/n".to_string()),
        (QuestionKind::Confirm, _) => Some("y/N".to_string()),
        (_, Some(Answer::Text(text))) if !text.is_empty() => Some(text.clone()),
        (_, Some(Answer::Choice(id))) => position(id),
        (_, Some(Answer::Choices(ids))) if !ids.is_empty() => {
            let numbers: Vec<String> = ids.iter().filter_map(|id| position(id)).collect();
            Some(numbers.join(","))
        }
        _ => None,
    };
    shown.map(|s| format!(" ({s})")).unwrap_or_default()
}
