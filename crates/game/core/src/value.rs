//! Loosely typed values carried in event contexts, message contexts and
//! fighter payloads.

use std::collections::BTreeMap;

use crate::fighter::Combatant;

/// A single context or payload value.
///
/// Serialized untagged. A combatant is written as its name, so the text
/// `"good_guy"` or `"bad_guy"` reads back as [`Value::Combatant`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Reference to one of the two fighters of a battle.
    Combatant(Combatant),
    Text(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_combatant(&self) -> Option<Combatant> {
        match self {
            Self::Combatant(combatant) => Some(*combatant),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Combatant(combatant) => write!(f, "{combatant}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Combatant> for Value {
    fn from(value: Combatant) -> Self {
        Self::Combatant(value)
    }
}

/// Ordered key/value map used for event and message contexts.
pub type Context = BTreeMap<String, Value>;
