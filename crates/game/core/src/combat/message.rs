//! Narrated battle messages.

use crate::value::{Context, Value};

/// Immutable narration of one combat occurrence.
///
/// `message` is a template with `{{ placeholder }}` tokens whose values live
/// in `context`. Turning it into final text is the presentation layer's job.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleMessage {
    message: String,
    context: Context,
}

impl BattleMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Context::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &Context {
        &self.context
    }
}
