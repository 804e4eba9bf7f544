//! Player record helpers: construction, typed patching and status output.
use super::types::{CoreStats, Player, PlayerPatch, ShadowRank, StatName};

pub const DEFAULT_PLAYER_NAME: &str = "Shadow Monarch";

pub const STARTING_EXPERIENCE_TO_NEXT: u64 = 100;
pub const STARTING_HEALTH: u32 = 100;
pub const STARTING_MANA: u32 = 50;
pub const STARTING_BASE_STAT: u32 = 10;

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 1,
            experience: 0,
            experience_to_next: STARTING_EXPERIENCE_TO_NEXT,
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            mana: STARTING_MANA,
            max_mana: STARTING_MANA,
            strength: STARTING_BASE_STAT,
            intelligence: STARTING_BASE_STAT,
            agility: STARTING_BASE_STAT,
            charisma: STARTING_BASE_STAT,
            shadow_points: 0,
            shadow_rank: ShadowRank::F,
            skills: Vec::new(),
            inventory: Vec::new(),
            achievements: Vec::new(),
            daily_streak: 0,
            last_login: None,
        }
    }

    pub fn core_stats(&self) -> CoreStats {
        CoreStats {
            strength: self.strength,
            intelligence: self.intelligence,
            agility: self.agility,
            charisma: self.charisma,
        }
    }

    pub fn has_skill(&self, skill_id: &str) -> bool {
        self.skills.iter().any(|s| s.id == skill_id)
    }

    pub fn has_achievement(&self, achievement_id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == achievement_id)
    }

    /// Current value of a named stat, widened so callers can add signed deltas.
    pub fn stat(&self, stat: StatName) -> u64 {
        match stat {
            StatName::Strength => self.strength as u64,
            StatName::Intelligence => self.intelligence as u64,
            StatName::Agility => self.agility as u64,
            StatName::Charisma => self.charisma as u64,
            StatName::Health => self.health as u64,
            StatName::MaxHealth => self.max_health as u64,
            StatName::Mana => self.mana as u64,
            StatName::MaxMana => self.max_mana as u64,
            StatName::ShadowPoints => self.shadow_points,
        }
    }

    /// Field-by-field merge. No bounds checking: the caller owns validity.
    pub fn apply_patch(&mut self, patch: PlayerPatch) {
        let PlayerPatch {
            name,
            level,
            experience,
            experience_to_next,
            health,
            max_health,
            mana,
            max_mana,
            strength,
            intelligence,
            agility,
            charisma,
            shadow_points,
            shadow_rank,
            daily_streak,
            last_login,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = level {
            self.level = v;
        }
        if let Some(v) = experience {
            self.experience = v;
        }
        if let Some(v) = experience_to_next {
            self.experience_to_next = v;
        }
        if let Some(v) = health {
            self.health = v;
        }
        if let Some(v) = max_health {
            self.max_health = v;
        }
        if let Some(v) = mana {
            self.mana = v;
        }
        if let Some(v) = max_mana {
            self.max_mana = v;
        }
        if let Some(v) = strength {
            self.strength = v;
        }
        if let Some(v) = intelligence {
            self.intelligence = v;
        }
        if let Some(v) = agility {
            self.agility = v;
        }
        if let Some(v) = charisma {
            self.charisma = v;
        }
        if let Some(v) = shadow_points {
            self.shadow_points = v;
        }
        if let Some(v) = shadow_rank {
            self.shadow_rank = v;
        }
        if let Some(v) = daily_streak {
            self.daily_streak = v;
        }
        if let Some(v) = last_login {
            self.last_login = Some(v);
        }
    }

    /// Percent of the way to the next level, 0..=100.
    pub fn level_progress_percent(&self) -> u64 {
        if self.experience_to_next == 0 {
            return 100;
        }
        (self.experience.saturating_mul(100) / self.experience_to_next).min(100)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME)
    }
}

impl PlayerPatch {
    /// Patch that sets `stat` to `value`, saturating into the field's width.
    pub fn with_stat(mut self, stat: StatName, value: u64) -> Self {
        let narrow = |v: u64| u32::try_from(v).unwrap_or(u32::MAX);
        match stat {
            StatName::Strength => self.strength = Some(narrow(value)),
            StatName::Intelligence => self.intelligence = Some(narrow(value)),
            StatName::Agility => self.agility = Some(narrow(value)),
            StatName::Charisma => self.charisma = Some(narrow(value)),
            StatName::Health => self.health = Some(narrow(value)),
            StatName::MaxHealth => self.max_health = Some(narrow(value)),
            StatName::Mana => self.mana = Some(narrow(value)),
            StatName::MaxMana => self.max_mana = Some(narrow(value)),
            StatName::ShadowPoints => self.shadow_points = Some(value),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == PlayerPatch::default()
    }
}

/// Multi-line status card for terminal display.
pub fn format_player_status(player: &Player) -> String {
    let mut out = format!(
        "=== {} ===\nLevel {} | Rank {} | Streak {}d\n",
        player.name, player.level, player.shadow_rank, player.daily_streak
    );
    out.push_str(&format!(
        "XP {}/{} ({}%)\n",
        player.experience,
        player.experience_to_next,
        player.level_progress_percent()
    ));
    out.push_str(&format!(
        "HP {}/{} | MP {}/{}\n",
        player.health, player.max_health, player.mana, player.max_mana
    ));
    out.push_str(&format!(
        "STR {} INT {} AGI {} CHA {}\n",
        player.strength, player.intelligence, player.agility, player.charisma
    ));
    out.push_str(&format!(
        "Shadow points: {} | Skills: {} | Achievements: {}",
        player.shadow_points,
        player.skills.len(),
        player.achievements.len()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_matches_starting_profile() {
        let player = Player::default();
        assert_eq!(player.name, "Shadow Monarch");
        assert_eq!(player.level, 1);
        assert_eq!(player.experience_to_next, 100);
        assert_eq!(player.health, 100);
        assert_eq!(player.max_mana, 50);
        assert_eq!(player.core_stats().charisma, 10);
        assert_eq!(player.shadow_rank, ShadowRank::F);
        assert!(player.last_login.is_none());
    }

    #[test]
    fn test_patch_touches_only_given_fields() {
        let mut player = Player::default();
        player.apply_patch(PlayerPatch {
            strength: Some(42),
            shadow_rank: Some(ShadowRank::B),
            ..Default::default()
        });
        assert_eq!(player.strength, 42);
        assert_eq!(player.shadow_rank, ShadowRank::B);
        assert_eq!(player.agility, 10);
        assert_eq!(player.level, 1);
    }

    #[test]
    fn test_with_stat_saturates_narrow_fields() {
        let patch = PlayerPatch::default().with_stat(StatName::Agility, u64::MAX);
        assert_eq!(patch.agility, Some(u32::MAX));
        let patch = PlayerPatch::default().with_stat(StatName::ShadowPoints, 900);
        assert_eq!(patch.shadow_points, Some(900));
        assert!(PlayerPatch::default().is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_status_mentions_core_numbers() {
        let mut player = Player::new("Jin");
        player.experience = 50;
        let status = format_player_status(&player);
        assert!(status.contains("=== Jin ==="));
        assert!(status.contains("XP 50/100 (50%)"));
        assert!(status.contains("Rank F"));
    }
}
