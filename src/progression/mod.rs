//! Progression model: player, quests, skills and achievements.
//! The engine is a pure reducer over `GameState`; the session wraps it with
//! catalog lookups and snapshot persistence.

pub mod achievement;
pub mod catalog;
pub mod eligibility;
pub mod engine;
pub mod errors;
pub mod player;
pub mod quest;
pub mod session;
pub mod skill;
pub mod storage;
pub mod types;

pub use achievement::{
    achievements_by_category, evaluate_achievements, format_achievements, format_goals,
    newly_earned, progress_goals, Goal,
};
pub use catalog::{quest_by_id, quest_catalog, skill_by_id, skill_catalog};
pub use eligibility::{
    available_quests, available_skills, quest_unlocked, quests_by_category,
    quests_by_difficulty, random_daily_quest, requirements_met, skills_by_category,
};
pub use engine::{apply, apply_at, Action};
pub use errors::ProgressionError;
pub use player::{format_player_status, DEFAULT_PLAYER_NAME};
pub use quest::{format_quest_line, format_quest_list, format_quest_status};
pub use session::{GameSession, SessionOptions};
pub use skill::{calculate_skill_effects, effects_patch, format_skill_line};
pub use storage::{SledSnapshotStore, SledSnapshotStoreBuilder, SnapshotStore, DEFAULT_SNAPSHOT_KEY};
pub use types::*;
