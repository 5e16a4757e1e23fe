//! Scripted user input for testing

use super::input::{Result, UserInput};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Input that answers prompts from a queue
///
/// Text and password prompts share one queue; a prompt with no answer left
/// counts as cancelled. Every prompt shown is recorded.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<String>>,
    confirm: Option<bool>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text or password answer
    #[must_use]
    pub fn answer(self, answer: &str) -> Self {
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(answer.to_string());
        self
    }

    /// Answer every confirmation with `confirm`
    #[must_use]
    pub fn confirm(mut self, confirm: Option<bool>) -> Self {
        self.confirm = confirm;
        self
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn next(&self, prompt: &str) -> Option<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

impl UserInput for ScriptedInput {
    fn prompt_text(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        Ok(self.next(prompt).or_else(|| default.map(str::to_string)))
    }

    fn prompt_password(&self, prompt: &str) -> Result<Option<String>> {
        Ok(self.next(prompt))
    }

    fn prompt_confirm(&self, prompt: &str, _default: bool) -> Result<Option<bool>> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        Ok(self.confirm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_in_order() {
        let input = ScriptedInput::new().answer("admin").answer("secret");

        assert_eq!(input.prompt_text("Username", None).unwrap().as_deref(), Some("admin"));
        assert_eq!(input.prompt_password("Password").unwrap().as_deref(), Some("secret"));
        assert_eq!(input.prompt_password("Again").unwrap(), None);
        assert_eq!(input.prompts(), vec!["Username", "Password", "Again"]);
    }
}
