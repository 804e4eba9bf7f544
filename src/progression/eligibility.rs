//! Eligibility filters over the built-in catalogs.
//!
//! Everything here is a pure projection of the constant tables and the
//! caller's player snapshot.
use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::{quest_catalog, skill_catalog};
use super::types::{
    CoreStats, Quest, QuestCategory, QuestDifficulty, QuestRequirement, ShadowRank, Skill,
    SkillCategory, SkillRequirements,
};

pub fn quests_by_category(category: QuestCategory) -> Vec<Quest> {
    quest_catalog()
        .iter()
        .filter(|q| q.category == category)
        .cloned()
        .collect()
}

pub fn quests_by_difficulty(difficulty: QuestDifficulty) -> Vec<Quest> {
    quest_catalog()
        .iter()
        .filter(|q| q.difficulty == difficulty)
        .cloned()
        .collect()
}

/// Level and skill-count tags gate the quest board; streak and shadow-point
/// tags are not evaluated here.
pub fn quest_unlocked(quest: &Quest, level: u32, learned_skill_count: usize) -> bool {
    quest.requirements.iter().all(|req| match *req {
        QuestRequirement::Level(min) => level >= min,
        QuestRequirement::SkillsLearned(min) => learned_skill_count >= min,
        QuestRequirement::DailyStreak(_) | QuestRequirement::ShadowPoints(_) => true,
    })
}

pub fn available_quests(level: u32, learned_skill_count: usize) -> Vec<Quest> {
    quest_catalog()
        .iter()
        .filter(|q| quest_unlocked(q, level, learned_skill_count))
        .cloned()
        .collect()
}

/// Uniform pick among the daily quests.
pub fn random_daily_quest<R: Rng + ?Sized>(rng: &mut R) -> Option<Quest> {
    quests_by_category(QuestCategory::Daily).choose(rng).cloned()
}

pub fn skills_by_category(category: SkillCategory) -> Vec<Skill> {
    skill_catalog()
        .iter()
        .filter(|s| s.category == category)
        .cloned()
        .collect()
}

/// Every declared threshold must be met; undeclared ones impose nothing.
/// Rank is compared by ordinal position.
pub fn requirements_met(
    req: &SkillRequirements,
    level: u32,
    stats: &CoreStats,
    shadow_points: u64,
    shadow_rank: ShadowRank,
) -> bool {
    fn at_least<T: PartialOrd>(have: T, need: Option<T>) -> bool {
        need.map_or(true, |need| have >= need)
    }

    at_least(level, req.level)
        && at_least(stats.strength, req.strength)
        && at_least(stats.agility, req.agility)
        && at_least(stats.intelligence, req.intelligence)
        && at_least(stats.charisma, req.charisma)
        && at_least(shadow_points, req.shadow_points)
        && req.shadow_rank.map_or(true, |need| shadow_rank.meets(need))
}

pub fn available_skills(
    level: u32,
    stats: &CoreStats,
    shadow_points: u64,
    shadow_rank: ShadowRank,
) -> Vec<Skill> {
    skill_catalog()
        .iter()
        .filter(|s| requirements_met(&s.requirements, level, stats, shadow_points, shadow_rank))
        .cloned()
        .collect()
}
