use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Ordinal hunter rank. Declaration order is the rank order, so the derived
/// `Ord` compares `SS` above `S` and `SSS` above everything else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ShadowRank {
    F = 0,
    E,
    D,
    C,
    B,
    A,
    S,
    SS,
    SSS,
}

impl ShadowRank {
    pub const ALL: [ShadowRank; 9] = [
        ShadowRank::F,
        ShadowRank::E,
        ShadowRank::D,
        ShadowRank::C,
        ShadowRank::B,
        ShadowRank::A,
        ShadowRank::S,
        ShadowRank::SS,
        ShadowRank::SSS,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The next rank up, clamped at `SSS`.
    pub fn next(self) -> ShadowRank {
        let idx = (self.ordinal() as usize + 1).min(Self::ALL.len() - 1);
        Self::ALL[idx]
    }

    pub fn is_max(self) -> bool {
        self == ShadowRank::SSS
    }

    /// True when `self` is at or above `required` in rank order.
    pub fn meets(self, required: ShadowRank) -> bool {
        self >= required
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShadowRank::F => "F",
            ShadowRank::E => "E",
            ShadowRank::D => "D",
            ShadowRank::C => "C",
            ShadowRank::B => "B",
            ShadowRank::A => "A",
            ShadowRank::S => "S",
            ShadowRank::SS => "SS",
            ShadowRank::SSS => "SSS",
        }
    }
}

impl Default for ShadowRank {
    fn default() -> Self {
        Self::F
    }
}

impl fmt::Display for ShadowRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
    Material,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub item_type: ItemType,
    pub rarity: ItemRarity,
    #[serde(default)]
    pub effects: BTreeMap<String, i32>,
}

// ============================================================================
// Player
// ============================================================================

/// Player fields a skill effect (or a stat patch) can address by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatName {
    Strength,
    Intelligence,
    Agility,
    Charisma,
    Health,
    MaxHealth,
    Mana,
    MaxMana,
    ShadowPoints,
}

impl StatName {
    /// Map an effect key onto a player field. Keys such as `stealth` or
    /// `shadow_power` describe flavour stats the player record does not carry.
    pub fn from_key(key: &str) -> Option<StatName> {
        match key {
            "strength" => Some(StatName::Strength),
            "intelligence" => Some(StatName::Intelligence),
            "agility" => Some(StatName::Agility),
            "charisma" => Some(StatName::Charisma),
            "health" => Some(StatName::Health),
            "max_health" => Some(StatName::MaxHealth),
            "mana" => Some(StatName::Mana),
            "max_mana" => Some(StatName::MaxMana),
            "shadow_points" => Some(StatName::ShadowPoints),
            _ => None,
        }
    }
}

/// The four base attributes that grow on level-up and gate skills.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CoreStats {
    pub strength: u32,
    pub intelligence: u32,
    pub agility: u32,
    pub charisma: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub strength: u32,
    pub intelligence: u32,
    pub agility: u32,
    pub charisma: u32,
    #[serde(default)]
    pub shadow_points: u64,
    #[serde(default)]
    pub shadow_rank: ShadowRank,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub daily_streak: u32,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Typed partial update for [`Player`]. Only the scalar fields are patchable;
/// skills and achievements change through their own actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub level: Option<u32>,
    pub experience: Option<u64>,
    pub experience_to_next: Option<u64>,
    pub health: Option<u32>,
    pub max_health: Option<u32>,
    pub mana: Option<u32>,
    pub max_mana: Option<u32>,
    pub strength: Option<u32>,
    pub intelligence: Option<u32>,
    pub agility: Option<u32>,
    pub charisma: Option<u32>,
    pub shadow_points: Option<u64>,
    pub shadow_rank: Option<ShadowRank>,
    pub daily_streak: Option<u32>,
    pub last_login: Option<DateTime<Utc>>,
}

// ============================================================================
// Quests
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestCategory {
    Daily,
    Weekly,
    Achievement,
    Special,
}

impl QuestCategory {
    pub const ALL: [QuestCategory; 4] = [
        QuestCategory::Daily,
        QuestCategory::Weekly,
        QuestCategory::Achievement,
        QuestCategory::Special,
    ];
}

impl FromStr for QuestCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(QuestCategory::Daily),
            "weekly" => Ok(QuestCategory::Weekly),
            "achievement" => Ok(QuestCategory::Achievement),
            "special" => Ok(QuestCategory::Special),
            other => Err(format!("unknown quest category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestDifficulty {
    Easy,
    Medium,
    Hard,
    Legendary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    Meditation,
    Exercise,
    Learning,
    Health,
    Social,
    Creativity,
    Streak,
    Level,
    Rank,
    Skills,
}

/// Unlock condition attached to a quest, written as a tag such as `level_10`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum QuestRequirement {
    Level(u32),
    SkillsLearned(usize),
    DailyStreak(u32),
    ShadowPoints(u64),
}

impl fmt::Display for QuestRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestRequirement::Level(n) => write!(f, "level_{}", n),
            QuestRequirement::SkillsLearned(n) => write!(f, "skills_{}", n),
            QuestRequirement::DailyStreak(n) => write!(f, "daily_streak_{}", n),
            QuestRequirement::ShadowPoints(n) => write!(f, "shadow_points_{}", n),
        }
    }
}

impl FromStr for QuestRequirement {
    type Err = String;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let (prefix, value) = tag
            .rsplit_once('_')
            .ok_or_else(|| format!("malformed requirement tag: {}", tag))?;
        let bad = |_| format!("malformed requirement tag: {}", tag);
        match prefix {
            "level" => value.parse().map(QuestRequirement::Level).map_err(bad),
            "skills" => value.parse().map(QuestRequirement::SkillsLearned).map_err(bad),
            "daily_streak" => value.parse().map(QuestRequirement::DailyStreak).map_err(bad),
            "shadow_points" => value.parse().map(QuestRequirement::ShadowPoints).map_err(bad),
            _ => Err(format!("unknown requirement tag: {}", tag)),
        }
    }
}

impl TryFrom<String> for QuestRequirement {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuestRequirement> for String {
    fn from(value: QuestRequirement) -> Self {
        value.to_string()
    }
}

/// A quest. Catalog entries are templates; accepted copies carry an instance
/// id, the template id, the acceptance time and progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: QuestCategory,
    pub difficulty: QuestDifficulty,
    pub experience_reward: u64,
    pub shadow_points_reward: u64,
    #[serde(default)]
    pub requirements: Vec<QuestRequirement>,
    pub quest_type: QuestType,
    /// Minutes the activity should take.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub target: Option<u32>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuestLog {
    #[serde(default)]
    pub active: Vec<Quest>,
    #[serde(default)]
    pub completed: Vec<Quest>,
    #[serde(default)]
    pub available: Vec<Quest>,
}

// ============================================================================
// Skills
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Physical,
    Mental,
    Social,
    Shadow,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Physical,
        SkillCategory::Mental,
        SkillCategory::Social,
        SkillCategory::Shadow,
    ];
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "physical" => Ok(SkillCategory::Physical),
            "mental" => Ok(SkillCategory::Mental),
            "social" => Ok(SkillCategory::Social),
            "shadow" => Ok(SkillCategory::Shadow),
            other => Err(format!("unknown skill category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    Movement,
    Defense,
    Speed,
    Psychic,
    Memory,
    Concentration,
    Influence,
    Emotional,
    Leadership,
    Elemental,
    Teleportation,
    Summoning,
}

/// Thresholds a player must meet to learn a skill. `None` imposes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillRequirements {
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub strength: Option<u32>,
    #[serde(default)]
    pub agility: Option<u32>,
    #[serde(default)]
    pub intelligence: Option<u32>,
    #[serde(default)]
    pub charisma: Option<u32>,
    #[serde(default)]
    pub shadow_points: Option<u64>,
    #[serde(default)]
    pub shadow_rank: Option<ShadowRank>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: SkillCategory,
    pub skill_type: SkillType,
    pub level: u32,
    pub max_level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    /// Stat name -> delta applied once when the skill is learned.
    #[serde(default)]
    pub effects: BTreeMap<String, i32>,
    #[serde(default)]
    pub requirements: SkillRequirements,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub learned_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Achievements & notifications
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Quests,
    Level,
    Skills,
    Streak,
    Shadow,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    pub unlocked: bool,
    pub progress: u64,
    pub max_progress: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    LevelUp,
    Achievement,
    QuestComplete,
    SkillLearned,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// Creation time in epoch milliseconds, unique within the queue.
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemState {
    /// FIFO; oldest first.
    #[serde(default)]
    pub notifications: Vec<Notification>,
    pub dark_mode: bool,
    pub sound_enabled: bool,
}

impl Default for SystemState {
    fn default() -> Self {
        Self {
            notifications: Vec::new(),
            dark_mode: true,
            sound_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub player: Player,
    #[serde(default)]
    pub quests: QuestLog,
    #[serde(default)]
    pub system: SystemState,
}

impl GameState {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            quests: QuestLog::default(),
            system: SystemState::default(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Player::default())
    }
}
