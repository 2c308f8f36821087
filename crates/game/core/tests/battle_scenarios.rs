use battle_core::{
    Battle, BattleError, BattleEvent, BattleOptions, BattleResult, BattleState, BattleTurn,
    Character, Combatant, DamageEvent, DamageRoundMask, Fighter, FighterTemplate, PcgDiceBag,
    ScriptedDiceBag, Side, Value, share,
};

#[derive(Debug, Clone)]
struct Adventurer {
    level: i32,
    health: i32,
    attack: i32,
    defense: i32,
}

impl Character for Adventurer {
    fn name(&self) -> &str {
        "Violet"
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn weapon(&self) -> Option<&str> {
        Some("Rapier")
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn max_health(&self) -> i32 {
        60
    }

    fn attack(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }
}

fn dragon() -> FighterTemplate {
    FighterTemplate {
        name: "Green Dragon".into(),
        level: 8,
        weapon: Some("Fiery breath".into()),
        health: 55,
        attack: 14,
        defense: 9,
        extra: [
            ("gold".to_owned(), Value::Int(120)),
            ("experience".to_owned(), Value::Int(300)),
            ("textDefeated".to_owned(), Value::from("The dragon crashes down.")),
            ("textLost".to_owned(), Value::from("The dragon laughs.")),
        ]
        .into_iter()
        .collect(),
    }
}

#[test]
fn level_adjusted_attack_deals_rolled_difference() {
    let state = BattleState::new(
        Fighter::new(Side::Player)
            .with_name("Violet")
            .with_attack(15)
            .with_defense(10)
            .with_level(10)
            .with_health(60),
        Fighter::new(Side::Opponent)
            .with_name("Ogre")
            .with_attack(10)
            .with_defense(5)
            .with_level(5)
            .with_health(40),
        BattleOptions::plain().with_level_adjustment(true),
    );

    let mut dice = ScriptedDiceBag::new().with_pseudo_bells([80, 30]);
    let events = BattleTurn::new(&mut dice)
        .partial_turn(&state, Combatant::GoodGuy, Combatant::BadGuy)
        .unwrap();

    let damage = events
        .iter()
        .find_map(BattleEvent::as_damage)
        .map(DamageEvent::damage);
    assert_eq!(damage, Some(50));
}

#[test]
fn six_queued_hits_end_after_the_third() {
    let character = share(Adventurer {
        level: 3,
        health: 30,
        attack: 6,
        defense: 4,
    });
    let battle = Battle::new(character, ScriptedDiceBag::new());
    let mut state = battle.start(&dragon(), BattleOptions::plain()).unwrap();

    let events: Vec<BattleEvent> = (0..6)
        .map(|_| {
            DamageEvent::new(Combatant::BadGuy, Combatant::GoodGuy, 10)
                .unwrap()
                .into()
        })
        .collect();

    let processed = battle.process_battle_events(events, &mut state).unwrap();

    assert_eq!(processed.len(), 4);
    assert!(matches!(processed.last(), Some(BattleEvent::Death(_))));
    assert_eq!(state.result(), BattleResult::BadGuyWon);
    assert_eq!(state.good_guy().health(), 0);
}

#[test]
fn seeded_fight_runs_to_completion_and_writes_back_health() {
    let character = share(Adventurer {
        level: 9,
        health: 60,
        attack: 16,
        defense: 11,
    });
    let mut battle = Battle::new(character.clone(), PcgDiceBag::from_seed(0xBA77_1E));
    let mut state = battle.start_with_defaults(&dragon()).unwrap();

    let fought = battle
        .fight_n_rounds(&mut state, 500, DamageRoundMask::BOTH)
        .unwrap();

    assert!(state.is_over());
    assert_eq!(fought, state.round_counter());
    assert_eq!(state.message_rounds().len() as u32, fought);

    for (index, log) in state.message_rounds().iter().enumerate() {
        assert_eq!(log.round(), index as u32);
    }

    let last = state
        .message_rounds()
        .last()
        .and_then(|log| log.messages().last())
        .unwrap();
    match state.result() {
        BattleResult::GoodGuyWon => {
            assert_eq!(last.message(), "You defeated {{ victim }}.");
            assert_eq!(state.rewards().map(|r| r.gold), Some(120));
            assert_eq!(state.outcome_text(), Some("The dragon crashes down."));
        }
        BattleResult::BadGuyWon => {
            assert_eq!(last.message(), "You died.");
            assert_eq!(state.outcome_text(), Some("The dragon laughs."));
        }
        BattleResult::Undecided => unreachable!("battle reported over"),
    }

    assert_eq!(character.borrow().health(), state.good_guy().health());
    assert!(matches!(
        battle.fight_one_round(&mut state, DamageRoundMask::BOTH),
        Err(BattleError::BattleAlreadyOver)
    ));
}

#[test]
fn same_seed_replays_the_same_fight() {
    let run = |seed: u64| {
        let character = share(Adventurer {
            level: 4,
            health: 60,
            attack: 12,
            defense: 8,
        });
        let mut battle = Battle::new(character, PcgDiceBag::from_seed(seed));
        let mut state = battle.start_with_defaults(&dragon()).unwrap();
        battle
            .fight_n_rounds(&mut state, 500, DamageRoundMask::BOTH)
            .unwrap();
        state
    };

    let first = run(99);
    let second = run(99);

    assert_eq!(first.result(), second.result());
    assert_eq!(first.message_rounds(), second.message_rounds());
    assert_eq!(first.fighters(), second.fighters());
}
