//! Persistent player character.

use battle_core::Character;

/// Player character as stored on disk.
///
/// `attack` and `defense` are the unequipped base values; the equipment
/// bonuses are folded in when the engine reads them through [`Character`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSheet {
    pub name: String,
    pub level: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<String>,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon_bonus: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor_bonus: i32,
}

impl Character for CharacterSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn weapon(&self) -> Option<&str> {
        self.weapon.as_deref()
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn attack(&self) -> i32 {
        self.attack + self.weapon_bonus
    }

    fn defense(&self) -> i32 {
        self.defense + self.armor_bonus
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_is_folded_into_combat_values() {
        let sheet = CharacterSheet {
            name: "Violet".into(),
            level: 4,
            weapon: Some("Rapier".into()),
            health: 40,
            max_health: 40,
            attack: 6,
            defense: 5,
            weapon_bonus: 3,
            armor_bonus: 2,
        };

        assert_eq!(sheet.attack(), 9);
        assert_eq!(sheet.defense(), 7);
        assert_eq!(Character::weapon(&sheet), Some("Rapier"));
    }

    #[test]
    fn set_health_updates_sheet() {
        let mut sheet = CharacterSheet {
            health: 40,
            max_health: 40,
            ..CharacterSheet::default()
        };
        sheet.set_health(-3);
        assert_eq!(sheet.health, -3);
    }
}
