//! Narration rendering via `minijinja`.
//!
//! Messages keep their `{{ key }}` placeholders until they reach the
//! terminal. Each template is rendered against the message's own context;
//! a placeholder without a matching context entry is an error.

use battle_core::BattleMessage;
use minijinja::{Environment, UndefinedBehavior};

/// Renders [`BattleMessage`] templates to plain text.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    pub fn render(&self, message: &BattleMessage) -> Result<String, minijinja::Error> {
        self.env.render_str(message.message(), message.context())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
