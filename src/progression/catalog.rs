//! Built-in quest and skill tables.
//!
//! Both tables are built once and handed out as `'static` slices; order is
//! declaration order and every filter preserves it.
use std::sync::OnceLock;

use super::types::{
    Quest, QuestCategory, QuestDifficulty, QuestRequirement, QuestType, ShadowRank, Skill,
    SkillCategory, SkillRequirements, SkillType,
};

static QUESTS: OnceLock<Vec<Quest>> = OnceLock::new();
static SKILLS: OnceLock<Vec<Skill>> = OnceLock::new();

pub fn quest_catalog() -> &'static [Quest] {
    QUESTS.get_or_init(seed_quests)
}

pub fn skill_catalog() -> &'static [Skill] {
    SKILLS.get_or_init(seed_skills)
}

pub fn quest_by_id(id: &str) -> Option<&'static Quest> {
    quest_catalog().iter().find(|q| q.id == id)
}

pub fn skill_by_id(id: &str) -> Option<&'static Skill> {
    skill_catalog().iter().find(|s| s.id == id)
}

fn seed_quests() -> Vec<Quest> {
    use QuestCategory::*;
    use QuestDifficulty::*;

    vec![
        // Daily
        Quest::template(
            "daily_meditation",
            "Shadow Meditation",
            "Practice mindfulness for 10 minutes",
            Daily,
            Easy,
            QuestType::Meditation,
        )
        .with_rewards(25, 5)
        .with_duration(10),
        Quest::template(
            "daily_exercise",
            "Physical Training",
            "Complete 30 minutes of workout",
            Daily,
            Medium,
            QuestType::Exercise,
        )
        .with_rewards(50, 10)
        .with_duration(30),
        Quest::template(
            "daily_reading",
            "Knowledge Absorption",
            "Read for 20 minutes",
            Daily,
            Easy,
            QuestType::Learning,
        )
        .with_rewards(30, 8)
        .with_duration(20),
        Quest::template(
            "daily_water",
            "Hydration Ritual",
            "Drink 8 glasses of water",
            Daily,
            Easy,
            QuestType::Health,
        )
        .with_rewards(20, 3)
        .with_target(8),
        // Weekly
        Quest::template(
            "weekly_skill",
            "Skill Mastery",
            "Practice a new skill for 5 hours this week",
            Weekly,
            Hard,
            QuestType::Learning,
        )
        .with_rewards(200, 50)
        .with_duration(300),
        Quest::template(
            "weekly_social",
            "Social Connection",
            "Have meaningful conversations with 3 different people",
            Weekly,
            Medium,
            QuestType::Social,
        )
        .with_rewards(100, 25)
        .with_target(3),
        Quest::template(
            "weekly_creativity",
            "Creative Expression",
            "Create something new (art, writing, music, etc.)",
            Weekly,
            Medium,
            QuestType::Creativity,
        )
        .with_rewards(150, 30),
        // Achievement
        Quest::template(
            "streak_7",
            "Week Warrior",
            "Maintain a 7-day streak of daily quests",
            Achievement,
            Hard,
            QuestType::Streak,
        )
        .with_rewards(500, 100)
        .with_requirement(QuestRequirement::DailyStreak(7))
        .with_target(7),
        Quest::template(
            "streak_30",
            "Month Master",
            "Maintain a 30-day streak of daily quests",
            Achievement,
            Legendary,
            QuestType::Streak,
        )
        .with_rewards(2000, 500)
        .with_requirement(QuestRequirement::DailyStreak(30))
        .with_target(30),
        Quest::template(
            "level_10",
            "Decade Warrior",
            "Reach level 10",
            Achievement,
            Medium,
            QuestType::Level,
        )
        .with_rewards(1000, 200)
        .with_requirement(QuestRequirement::Level(10))
        .with_target(10),
        Quest::template(
            "level_50",
            "Half-Century Hero",
            "Reach level 50",
            Achievement,
            Legendary,
            QuestType::Level,
        )
        .with_rewards(5000, 1000)
        .with_requirement(QuestRequirement::Level(50))
        .with_target(50),
        // Special
        Quest::template(
            "shadow_rank_up",
            "Rank Advancement",
            "Advance your shadow rank",
            Special,
            Hard,
            QuestType::Rank,
        )
        .with_rewards(300, 75)
        .with_requirement(QuestRequirement::ShadowPoints(100)),
        Quest::template(
            "skill_combo",
            "Skill Combination",
            "Learn 5 different skills",
            Special,
            Hard,
            QuestType::Skills,
        )
        .with_rewards(400, 80)
        .with_requirement(QuestRequirement::SkillsLearned(5))
        .with_target(5),
    ]
}

fn seed_skills() -> Vec<Skill> {
    use SkillCategory::*;

    vec![
        // Physical
        Skill::new(
            "shadow_step",
            "Shadow Step",
            "Move silently and quickly between shadows",
            Physical,
            SkillType::Movement,
            100,
        )
        .with_effect("agility", 2)
        .with_effect("stealth", 1)
        .with_requirements(SkillRequirements {
            level: Some(1),
            agility: Some(5),
            ..Default::default()
        })
        .with_display("👤", "from-purple-500 to-blue-500"),
        Skill::new(
            "iron_body",
            "Iron Body",
            "Strengthen your physical resilience",
            Physical,
            SkillType::Defense,
            150,
        )
        .with_effect("strength", 3)
        .with_effect("health", 10)
        .with_requirements(SkillRequirements {
            level: Some(2),
            strength: Some(8),
            ..Default::default()
        })
        .with_display("🛡️", "from-gray-500 to-gray-700"),
        Skill::new(
            "lightning_reflexes",
            "Lightning Reflexes",
            "Enhance your reaction speed and agility",
            Physical,
            SkillType::Speed,
            120,
        )
        .with_effect("agility", 3)
        .with_effect("reaction", 2)
        .with_requirements(SkillRequirements {
            level: Some(3),
            agility: Some(10),
            ..Default::default()
        })
        .with_display("⚡", "from-yellow-400 to-orange-500"),
        // Mental
        Skill::new(
            "mind_reading",
            "Mind Reading",
            "Sense the thoughts and emotions of others",
            Mental,
            SkillType::Psychic,
            200,
        )
        .with_effect("intelligence", 3)
        .with_effect("charisma", 2)
        .with_requirements(SkillRequirements {
            level: Some(5),
            intelligence: Some(15),
            ..Default::default()
        })
        .with_display("🧠", "from-pink-400 to-purple-600"),
        Skill::new(
            "memory_palace",
            "Memory Palace",
            "Create a mental space for perfect recall",
            Mental,
            SkillType::Memory,
            180,
        )
        .with_effect("intelligence", 4)
        .with_effect("learning", 3)
        .with_requirements(SkillRequirements {
            level: Some(4),
            intelligence: Some(12),
            ..Default::default()
        })
        .with_display("🏛️", "from-blue-400 to-indigo-600"),
        Skill::new(
            "focus_mastery",
            "Focus Mastery",
            "Achieve deep concentration and mental clarity",
            Mental,
            SkillType::Concentration,
            160,
        )
        .with_effect("intelligence", 2)
        .with_effect("productivity", 3)
        .with_requirements(SkillRequirements {
            level: Some(2),
            intelligence: Some(8),
            ..Default::default()
        })
        .with_display("🎯", "from-green-400 to-emerald-600"),
        // Social
        Skill::new(
            "charisma_aura",
            "Charisma Aura",
            "Project an irresistible charm and presence",
            Social,
            SkillType::Influence,
            175,
        )
        .with_effect("charisma", 4)
        .with_effect("persuasion", 2)
        .with_requirements(SkillRequirements {
            level: Some(3),
            charisma: Some(10),
            ..Default::default()
        })
        .with_display("✨", "from-yellow-300 to-amber-500"),
        Skill::new(
            "empathy_link",
            "Empathy Link",
            "Connect deeply with others' emotions",
            Social,
            SkillType::Emotional,
            190,
        )
        .with_effect("charisma", 3)
        .with_effect("empathy", 3)
        .with_requirements(SkillRequirements {
            level: Some(4),
            charisma: Some(12),
            ..Default::default()
        })
        .with_display("💝", "from-pink-300 to-rose-500"),
        Skill::new(
            "leadership_magnetism",
            "Leadership Magnetism",
            "Inspire and lead others naturally",
            Social,
            SkillType::Leadership,
            250,
        )
        .with_effect("charisma", 5)
        .with_effect("leadership", 3)
        .with_requirements(SkillRequirements {
            level: Some(6),
            charisma: Some(18),
            ..Default::default()
        })
        .with_display("👑", "from-yellow-500 to-orange-600"),
        // Shadow
        Skill::new(
            "shadow_manipulation",
            "Shadow Manipulation",
            "Control and shape shadows at will",
            Shadow,
            SkillType::Elemental,
            300,
        )
        .with_effect("shadow_power", 5)
        .with_effect("intelligence", 2)
        .with_requirements(SkillRequirements {
            level: Some(8),
            shadow_points: Some(50),
            ..Default::default()
        })
        .with_display("🌑", "from-gray-800 to-black"),
        Skill::new(
            "shadow_portal",
            "Shadow Portal",
            "Create portals through shadow dimensions",
            Shadow,
            SkillType::Teleportation,
            400,
        )
        .with_effect("shadow_power", 8)
        .with_effect("mobility", 5)
        .with_requirements(SkillRequirements {
            level: Some(10),
            shadow_points: Some(100),
            shadow_rank: Some(ShadowRank::C),
            ..Default::default()
        })
        .with_display("🌀", "from-purple-800 to-indigo-900"),
        Skill::new(
            "shadow_army",
            "Shadow Army",
            "Summon and command shadow soldiers",
            Shadow,
            SkillType::Summoning,
            500,
        )
        .with_effect("shadow_power", 10)
        .with_effect("leadership", 5)
        .with_requirements(SkillRequirements {
            level: Some(15),
            shadow_points: Some(200),
            shadow_rank: Some(ShadowRank::B),
            ..Default::default()
        })
        .with_display("👥", "from-gray-900 to-black"),
    ]
}
