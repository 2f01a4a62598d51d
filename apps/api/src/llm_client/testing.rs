//! Test double for `TextGenerator`.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Citation, LlmError, ModelResponse, TextGenerator};

/// Answers every call with the same scripted reply and records the calls.
pub struct ScriptedGenerator {
    reply: Result<ModelResponse, (u16, String)>,
    calls: Mutex<Vec<(String, bool)>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        Self::replying_with_citations(text, Vec::new())
    }

    pub fn replying_with_citations(text: &str, citations: Vec<Citation>) -> Self {
        Self {
            reply: Ok(ModelResponse {
                text: text.to_string(),
                citations,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Err((status, message.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(prompt, search)` for every call so far.
    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, search: bool) -> Result<ModelResponse, LlmError> {
        self.calls.lock().unwrap().push((prompt.to_string(), search));
        match &self.reply {
            Ok(response) => Ok(response.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
