//! Scripted collaborator for tests. Replays a fixed reply and records prompts.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Collaborator, LlmError};

pub enum Script {
    Reply(String),
    Fail { status: u16, message: String },
}

pub struct ScriptedCollaborator {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCollaborator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(Script::Reply(text.into()))
    }

    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self::new(Script::Fail {
            status,
            message: message.into(),
        })
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Collaborator for ScriptedCollaborator {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
