//! Terminal client for the combat engine.
//!
//! # Architecture
//!
//! ```text
//! main
//!   ├─→ ClientConfig::from_env  (environment)
//!   ├─→ setup_logging           (tracing subscriber)
//!   └─→ app::run
//!         ├─→ ContentFactory    (battle.toml, creatures.ron, character.toml)
//!         ├─→ Battle            (battle-core, seeded PcgDiceBag)
//!         └─→ Renderer          (minijinja over message templates)
//! ```

pub mod app;
pub mod config;
pub mod logging;
pub mod render;

pub use config::ClientConfig;
pub use logging::{log_failure, setup_logging};
pub use render::Renderer;
