use std::io::{self, BufRead, Write};

mod setup;
pub use setup::{materialize_secrets, Outcome, SetupPaths};

/// Yes/no decision before a destructive step.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> io::Result<bool>,
{
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self(prompt)
    }
}

/// Asks on stdout, answers from one line of stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(is_affirmative(&input))
    }
}

/// `--yes`
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        Ok(true)
    }
}

#[inline]
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
