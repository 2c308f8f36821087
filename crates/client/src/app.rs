//! One fight from content loading to the final tally.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use battle_content::{CharacterSheet, ContentFactory};
use battle_core::{
    Battle, BattleResult, BattleState, DamageRoundMask, FighterTemplate, PcgDiceBag, RoundLog,
    SharedCharacter,
};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::render::Renderer;

/// Load content, fight until the battle is decided or the round limit is hit,
/// and narrate everything to `out`.
pub fn run(config: &ClientConfig, out: &mut impl Write) -> Result<BattleResult> {
    let factory = ContentFactory::new(&config.data_dir);
    let battle_config = factory.load_config()?;
    let template = select_creature(&factory, config.creature.as_deref())?;

    let sheet = Rc::new(RefCell::new(factory.load_character()?));
    let character: SharedCharacter = sheet.clone();

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, creature = %template.name, "Starting battle");

    let mut battle =
        Battle::new(character, PcgDiceBag::from_seed(seed)).with_config(battle_config);
    let mut state = battle.start_with_defaults(&template)?;

    let renderer = Renderer::new();
    write_matchup(out, &state)?;

    if config.surprised {
        writeln!(out, "{} catches you by surprise!", template.name)?;
        battle.fight_one_round(&mut state, DamageRoundMask::DEFENSE)?;
        write_latest_round(out, &renderer, &state)?;
    }

    let mut fought = 0;
    while !state.is_over() && fought < config.max_rounds {
        battle.fight_one_round(&mut state, DamageRoundMask::BOTH)?;
        write_latest_round(out, &renderer, &state)?;
        fought += 1;
    }
    debug!(fought, result = %state.result(), "Fight loop finished");

    write_outcome(out, &state, &sheet.borrow())?;

    if config.persist {
        factory
            .save_character(&sheet.borrow())
            .context("Failed to persist character")?;
        info!("Character saved to {}", factory.data_dir().display());
    }

    Ok(state.result())
}

fn select_creature(factory: &ContentFactory, id: Option<&str>) -> Result<FighterTemplate> {
    match id {
        Some(id) => factory.load_creature(id),
        None => factory
            .load_creatures()?
            .into_iter()
            .next()
            .map(|(_, template)| template)
            .context("Creature catalog is empty"),
    }
}

fn write_matchup(out: &mut impl Write, state: &BattleState) -> Result<()> {
    let (good_guy, bad_guy) = (state.good_guy(), state.bad_guy());
    writeln!(
        out,
        "{} (level {}, {}) faces {} (level {}, {})",
        good_guy.name(),
        good_guy.level(),
        good_guy.weapon().unwrap_or("bare hands"),
        bad_guy.name(),
        bad_guy.level(),
        bad_guy.weapon().unwrap_or("bare hands"),
    )?;
    Ok(())
}

fn write_latest_round(
    out: &mut impl Write,
    renderer: &Renderer,
    state: &BattleState,
) -> Result<()> {
    if let Some(log) = state.message_rounds().last() {
        write_round(out, renderer, log)?;
    }
    writeln!(
        out,
        "  [{}: {} | {}: {}]",
        state.good_guy().name(),
        state.good_guy().health(),
        state.bad_guy().name(),
        state.bad_guy().health(),
    )?;
    Ok(())
}

fn write_round(out: &mut impl Write, renderer: &Renderer, log: &RoundLog) -> Result<()> {
    writeln!(out, "~ Round {} ~", log.round() + 1)?;
    for message in log.messages() {
        let text = renderer
            .render(message)
            .with_context(|| format!("Failed to render message: {}", message.message()))?;
        writeln!(out, "  {text}")?;
    }
    Ok(())
}

fn write_outcome(out: &mut impl Write, state: &BattleState, sheet: &CharacterSheet) -> Result<()> {
    match state.result() {
        BattleResult::Undecided => {
            writeln!(out, "The fight drags on without a victor.")?;
        }
        BattleResult::GoodGuyWon => {
            writeln!(out, "Victory!")?;
        }
        BattleResult::BadGuyWon => {
            writeln!(out, "Defeat.")?;
        }
    }

    if let Some(loser) = state.loser() {
        writeln!(out, "{} is out of the fight.", state.fighter(loser).name())?;
    }
    if let Some(text) = state.outcome_text() {
        writeln!(out, "{text}")?;
    }
    if let Some(rewards) = state.rewards() {
        writeln!(
            out,
            "You gain {} gold and {} experience.",
            rewards.gold, rewards.experience
        )?;
    }
    writeln!(
        out,
        "{} has {} of {} health left.",
        sheet.name, sheet.health, sheet.max_health
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_content::loaders::CharacterLoader;
    use tempfile::TempDir;

    fn config(data_dir: impl Into<std::path::PathBuf>) -> ClientConfig {
        ClientConfig {
            data_dir: data_dir.into(),
            creature: Some("rabid_rat".into()),
            seed: Some(7),
            ..ClientConfig::default()
        }
    }

    fn copy_bundled_data(dir: &TempDir) {
        let bundled = std::path::Path::new(ClientConfig::DEFAULT_DATA_DIR);
        for file in [
            ContentFactory::CONFIG_FILE,
            ContentFactory::CHARACTER_FILE,
            ContentFactory::CREATURES_FILE,
        ] {
            std::fs::copy(bundled.join(file), dir.path().join(file)).unwrap();
        }
    }

    #[test]
    fn seeded_fight_is_narrated_to_the_end() {
        let mut out = Vec::new();
        let result = run(&config(ClientConfig::DEFAULT_DATA_DIR), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(result, BattleResult::GoodGuyWon);
        assert!(text.starts_with("Violet (level 3, Rapier) faces Rabid Rat"));
        assert!(text.contains("~ Round 1 ~"));
        assert!(text.contains("You defeated Rabid Rat."));
        assert!(text.contains("Rabid Rat is out of the fight."));
        assert!(text.contains("You gain 18 gold and 14 experience."));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn same_seed_prints_the_same_fight() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        run(&config(ClientConfig::DEFAULT_DATA_DIR), &mut first).unwrap();
        run(&config(ClientConfig::DEFAULT_DATA_DIR), &mut second).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn persisted_health_matches_the_fight() {
        let dir = TempDir::new().unwrap();
        copy_bundled_data(&dir);
        let config = ClientConfig {
            persist: true,
            surprised: true,
            ..config(dir.path())
        };

        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let saved =
            CharacterLoader::load(&dir.path().join(ContentFactory::CHARACTER_FILE)).unwrap();
        assert!(text.contains("Rabid Rat catches you by surprise!"));
        assert!(text.contains(&format!(
            "Violet has {} of {} health left.",
            saved.health, saved.max_health
        )));
    }

    #[test]
    fn unknown_creature_is_an_error() {
        let config = ClientConfig {
            creature: Some("dragon".into()),
            ..config(ClientConfig::DEFAULT_DATA_DIR)
        };

        assert!(run(&config, &mut Vec::new()).is_err());
    }
}
