//! Client configuration read from the process environment.

use std::env;
use std::path::PathBuf;

/// Settings of a single `battle` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory holding `battle.toml`, `creatures.ron` and `character.toml`.
    pub data_dir: PathBuf,
    /// Creature id to fight. The first catalog entry when unset.
    pub creature: Option<String>,
    /// Dice seed. Drawn at random when unset.
    pub seed: Option<u64>,
    /// Rounds fought before the client gives up on an undecided fight.
    pub max_rounds: u32,
    /// The creature gets a free round before the fight starts.
    pub surprised: bool,
    /// Write the character's health back to `character.toml` afterwards.
    pub persist: bool,
    /// Additional log file directory; stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            creature: None,
            seed: None,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            surprised: false,
            persist: false,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_DATA_DIR: &'static str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data");
    pub const DEFAULT_MAX_ROUNDS: u32 = 100;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Content directory (default: bundled sample data)
    /// - `BATTLE_CREATURE` - Creature id (default: first in the catalog)
    /// - `BATTLE_SEED` - Dice seed (default: random)
    /// - `BATTLE_MAX_ROUNDS` - Round limit (default: 100)
    /// - `BATTLE_SURPRISED` - Creature strikes first (default: false)
    /// - `BATTLE_PERSIST` - Save the character afterwards (default: false)
    /// - `BATTLE_LOG_DIR` - Directory for `battle.log` (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("BATTLE_DATA_DIR") {
            config.data_dir = dir;
        }
        config.creature = read_env::<String>("BATTLE_CREATURE").filter(|id| !id.is_empty());
        config.seed = read_env::<u64>("BATTLE_SEED");
        if let Some(rounds) = read_env::<u32>("BATTLE_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }
        if let Some(surprised) = read_env_bool("BATTLE_SURPRISED") {
            config.surprised = surprised;
        }
        if let Some(persist) = read_env_bool("BATTLE_PERSIST") {
            config.persist = persist;
        }
        config.log_dir = read_env::<PathBuf>("BATTLE_LOG_DIR");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
