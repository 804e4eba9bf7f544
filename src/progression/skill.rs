//! Skill construction, effect math and skill formatting.
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::types::{
    Player, PlayerPatch, Skill, SkillCategory, SkillRequirements, SkillType, StatName,
};

pub const SKILL_MAX_LEVEL: u32 = 10;

impl Skill {
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        category: SkillCategory,
        skill_type: SkillType,
        experience_to_next: u64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            skill_type,
            level: 1,
            max_level: SKILL_MAX_LEVEL,
            experience: 0,
            experience_to_next,
            effects: BTreeMap::new(),
            requirements: SkillRequirements::default(),
            icon: String::new(),
            color: String::new(),
            learned_at: None,
        }
    }

    pub fn with_effect(mut self, stat: &str, delta: i32) -> Self {
        self.effects.insert(stat.to_string(), delta);
        self
    }

    pub fn with_requirements(mut self, requirements: SkillRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn with_display(mut self, icon: &str, color: &str) -> Self {
        self.icon = icon.to_string();
        self.color = color.to_string();
        self
    }

    /// Copy of this catalog skill as learned at `now`, with its running
    /// experience counter reset.
    pub fn learned(&self, now: DateTime<Utc>) -> Skill {
        Skill {
            learned_at: Some(now),
            experience: 0,
            ..self.clone()
        }
    }
}

/// Effects scaled to a given skill level.
pub fn calculate_skill_effects(skill: &Skill, level: u32) -> BTreeMap<String, i64> {
    skill
        .effects
        .iter()
        .map(|(stat, delta)| (stat.clone(), *delta as i64 * level as i64))
        .collect()
}

/// Patch that adds each of the skill's effects to the player's current value.
/// Effect keys that are not player fields are skipped.
pub fn effects_patch(player: &Player, skill: &Skill) -> PlayerPatch {
    skill
        .effects
        .iter()
        .filter_map(|(key, delta)| StatName::from_key(key).map(|stat| (stat, *delta)))
        .fold(PlayerPatch::default(), |patch, (stat, delta)| {
            let current = player.stat(stat);
            let next = if delta >= 0 {
                current.saturating_add(delta as u64)
            } else {
                current.saturating_sub(delta.unsigned_abs() as u64)
            };
            patch.with_stat(stat, next)
        })
}

pub fn category_label(category: SkillCategory) -> &'static str {
    match category {
        SkillCategory::Physical => "Physical",
        SkillCategory::Mental => "Mental",
        SkillCategory::Social => "Social",
        SkillCategory::Shadow => "Shadow",
    }
}

fn format_requirements(req: &SkillRequirements) -> String {
    let mut parts = Vec::new();
    if let Some(v) = req.level {
        parts.push(format!("Lv{}", v));
    }
    if let Some(v) = req.strength {
        parts.push(format!("STR {}", v));
    }
    if let Some(v) = req.agility {
        parts.push(format!("AGI {}", v));
    }
    if let Some(v) = req.intelligence {
        parts.push(format!("INT {}", v));
    }
    if let Some(v) = req.charisma {
        parts.push(format!("CHA {}", v));
    }
    if let Some(v) = req.shadow_points {
        parts.push(format!("{} SP", v));
    }
    if let Some(v) = req.shadow_rank {
        parts.push(format!("rank {}", v));
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

/// `status` is one of learned / available / locked, decided by the caller.
pub fn format_skill_line(skill: &Skill, status: &str) -> String {
    let effects: Vec<String> = skill
        .effects
        .iter()
        .map(|(k, v)| format!("{}{:+}", k, v))
        .collect();
    format!(
        "{} {} ({}) [{}] effects: {} | needs: {}",
        skill.icon,
        skill.name,
        skill.id,
        status,
        effects.join(" "),
        format_requirements(&skill.requirements)
    )
}
