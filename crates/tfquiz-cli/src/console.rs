//! Interactive terminal front end for a quiz session.
//!
//! Generic over the input/output streams so the whole loop can be driven from
//! a byte buffer in tests.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use tfquiz_core::result::QuizResult;
use tfquiz_core::session::{QuizSession, SessionState};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its trailing newline. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn prompt_required(&mut self, text: &str) -> Result<String> {
        self.prompt(text)?
            .ok_or_else(|| anyhow::anyhow!("input closed before the quiz finished"))
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Start `session`, trying `preset` first and asking until a valid name
    /// is given.
    pub fn start(&mut self, session: &mut QuizSession, preset: Option<&str>) -> Result<()> {
        let mut candidate = match preset {
            Some(name) => name.to_string(),
            None => self.prompt_required("Enter your name: ")?,
        };

        loop {
            match session.start(&candidate) {
                Ok(_) => break,
                Err(e) if e.is_recoverable() => {
                    self.say("Please enter your name to start.")?;
                    candidate = self.prompt_required("Enter your name: ")?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let name = session.participant_name().unwrap_or_default().to_string();
        let total = session.progress().total;
        self.say(&format!("\nWelcome, {name}! {total} questions ahead."))
    }

    /// Ask every remaining question and return the finished result.
    pub fn play(&mut self, session: &mut QuizSession) -> Result<QuizResult> {
        loop {
            let progress = session.progress();
            let text = session.current_question()?.text.clone();
            self.say(&format!(
                "\nQuestion {}/{}: {}",
                progress.position(),
                progress.total,
                text
            ))?;

            let given = loop {
                let line = self.prompt_required("[t]rue / [f]alse: ")?;
                match parse_answer(&line) {
                    Some(answer) => break answer,
                    None => self.say("Please answer true or false.")?,
                }
            };

            let feedback = session.submit_answer(given)?;
            self.say(&feedback.message())?;
            self.say(&format!("Score: {}", feedback.score))?;

            self.prompt_required("Press Enter to continue...")?;
            if session.advance()? == SessionState::Finished {
                break;
            }
        }

        Ok(session.summarize()?)
    }

    /// Yes/no question; end of input counts as "no".
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self
            .prompt(question)?
            .map(|line| matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false))
    }
}

/// Accepts t/true/y/yes/1 and f/false/n/no/0, case-insensitively.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "1" => Some(true),
        "f" | "false" | "n" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tfquiz_core::loader::QuestionSet;
    use tfquiz_core::model::Question;

    fn session() -> QuizSession {
        QuizSession::new(Arc::new(QuestionSet::new(vec![
            Question::new(1_i64, "Sky is blue", true),
            Question::new(2_i64, "Fish can fly", false).with_explanation("Mostly not."),
        ])))
    }

    fn run_script(script: &str, preset: Option<&str>) -> (Result<QuizResult>, String) {
        let mut out = Vec::new();
        let mut session = session();
        let result = {
            let mut console = Console::new(script.as_bytes(), &mut out);
            console
                .start(&mut session, preset)
                .and_then(|_| console.play(&mut session))
        };
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parse_answer_variants() {
        assert_eq!(parse_answer(" T "), Some(true));
        assert_eq!(parse_answer("yes"), Some(true));
        assert_eq!(parse_answer("FALSE"), Some(false));
        assert_eq!(parse_answer("0"), Some(false));
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn scripted_walkthrough() {
        let (result, transcript) = run_script("Ada\nt\n\ntrue\n\n", None);
        let result = result.unwrap();

        assert_eq!(result.name, "Ada");
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
        assert!(transcript.contains("Question 1/2: Sky is blue"));
        assert!(transcript.contains("Question 2/2: Fish can fly"));
        assert!(transcript.contains("Incorrect. Mostly not."));
    }

    #[test]
    fn blank_name_is_asked_again() {
        let (result, transcript) = run_script("   \nAda\nf\n\nf\n\n", None);
        assert_eq!(result.unwrap().score, 1);
        assert!(transcript.contains("Please enter your name to start."));
    }

    #[test]
    fn invalid_preset_falls_back_to_prompt() {
        let (result, _) = run_script("Bob\nt\n\nf\n\n", Some(""));
        let result = result.unwrap();
        assert_eq!(result.name, "Bob");
        assert_eq!(result.score, 2);
    }

    #[test]
    fn unrecognized_answer_is_asked_again() {
        let (result, transcript) = run_script("Ada\nmaybe\nt\n\nf\n\n", None);
        assert_eq!(result.unwrap().answers.len(), 2);
        assert!(transcript.contains("Please answer true or false."));
    }

    #[test]
    fn end_of_input_mid_quiz_is_an_error() {
        let (result, _) = run_script("Ada\nt\n", None);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut out = Vec::new();
        let mut console = Console::new("y\nnope\n".as_bytes(), &mut out);
        assert!(console.confirm("Again? ").unwrap());
        assert!(!console.confirm("Again? ").unwrap());
        assert!(!console.confirm("Again? ").unwrap());
    }
}
