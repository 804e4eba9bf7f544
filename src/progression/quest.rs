//! Quest templates, accepted instances and list/status formatting.
//!
//! Catalog quests are templates and are never mutated. Accepting one makes a
//! copy stamped with an instance id derived from the template id and the
//! acceptance time, which is what the engine tracks in the active set.
use chrono::{DateTime, Utc};

use super::types::{Quest, QuestCategory, QuestDifficulty, QuestRequirement, QuestType};

impl Quest {
    pub fn template(
        id: &str,
        name: &str,
        description: &str,
        category: QuestCategory,
        difficulty: QuestDifficulty,
        quest_type: QuestType,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            difficulty,
            experience_reward: 0,
            shadow_points_reward: 0,
            requirements: Vec::new(),
            quest_type,
            duration: None,
            target: None,
            template_id: None,
            accepted_at: None,
            progress: 0,
            completed: false,
        }
    }

    pub fn with_rewards(mut self, experience: u64, shadow_points: u64) -> Self {
        self.experience_reward = experience;
        self.shadow_points_reward = shadow_points;
        self
    }

    pub fn with_requirement(mut self, requirement: QuestRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn with_target(mut self, target: u32) -> Self {
        self.target = Some(target);
        self
    }

    /// Copy this template into a fresh accepted instance.
    pub fn accept(&self, now: DateTime<Utc>) -> Quest {
        let template_id = self.template_id.clone().unwrap_or_else(|| self.id.clone());
        Quest {
            id: format!("{}_{}", template_id, now.timestamp_millis()),
            template_id: Some(template_id),
            accepted_at: Some(now),
            progress: 0,
            completed: false,
            ..self.clone()
        }
    }
}

pub fn category_label(category: QuestCategory) -> &'static str {
    match category {
        QuestCategory::Daily => "Daily Quests",
        QuestCategory::Weekly => "Weekly Quests",
        QuestCategory::Achievement => "Achievements",
        QuestCategory::Special => "Special Quests",
    }
}

pub fn difficulty_label(difficulty: QuestDifficulty) -> &'static str {
    match difficulty {
        QuestDifficulty::Easy => "easy",
        QuestDifficulty::Medium => "medium",
        QuestDifficulty::Hard => "hard",
        QuestDifficulty::Legendary => "legendary",
    }
}

/// One-line summary used in quest listings.
pub fn format_quest_line(quest: &Quest) -> String {
    let mut line = format!(
        "{} - {} [{}] +{}xp +{}sp",
        quest.id,
        quest.name,
        difficulty_label(quest.difficulty),
        quest.experience_reward,
        quest.shadow_points_reward
    );
    if let Some(minutes) = quest.duration {
        line.push_str(&format!(" ({}m)", minutes));
    } else if let Some(target) = quest.target {
        line.push_str(&format!(" (x{})", target));
    }
    line
}

pub fn format_quest_list(title: &str, quests: &[Quest]) -> String {
    if quests.is_empty() {
        return format!("=== {} ===\nNo quests.", title);
    }
    let mut out = format!("=== {} ===", title);
    for (idx, quest) in quests.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", idx + 1, format_quest_line(quest)));
    }
    out
}

pub fn format_quest_status(quest: &Quest) -> String {
    let mut output = format!("=== {} ===\n{}\n", quest.name, quest.description);
    output.push_str(&format!(
        "Category: {:?} | Difficulty: {}\n",
        quest.category,
        difficulty_label(quest.difficulty)
    ));
    output.push_str(&format!(
        "Rewards: {} xp, {} shadow points",
        quest.experience_reward, quest.shadow_points_reward
    ));
    if !quest.requirements.is_empty() {
        let tags: Vec<String> = quest.requirements.iter().map(|r| r.to_string()).collect();
        output.push_str(&format!("\nRequires: {}", tags.join(", ")));
    }
    if let Some(accepted) = quest.accepted_at {
        output.push_str(&format!(
            "\nAccepted {} | progress {}{}",
            accepted.format("%Y-%m-%d %H:%M"),
            quest.progress,
            quest.target.map(|t| format!("/{}", t)).unwrap_or_default()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meditation() -> Quest {
        Quest::template(
            "daily_meditation",
            "Shadow Meditation",
            "Practice mindfulness for 10 minutes",
            QuestCategory::Daily,
            QuestDifficulty::Easy,
            QuestType::Meditation,
        )
        .with_rewards(25, 5)
        .with_duration(10)
    }

    #[test]
    fn test_accept_stamps_instance_without_touching_template() {
        let template = meditation();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let instance = template.accept(now);

        assert_eq!(
            instance.id,
            format!("daily_meditation_{}", now.timestamp_millis())
        );
        assert_eq!(instance.template_id.as_deref(), Some("daily_meditation"));
        assert_eq!(instance.accepted_at, Some(now));
        assert_eq!(instance.progress, 0);
        assert!(!instance.completed);
                assert_eq!(instance.experience_reward, 25);

        assert!(template.accepted_at.is_none());
        assert!(template.template_id.is_none());
        assert_eq!(template.id, "daily_meditation");
    }

    #[test]
    fn test_accepting_twice_gives_distinct_instances() {
        let template = meditation();
        let first = template.accept(Utc.timestamp_millis_opt(1_000).unwrap());
        let second = template.accept(Utc.timestamp_millis_opt(2_000).unwrap());
        assert_ne!(first.id, second.id);
        assert_eq!(first.template_id, second.template_id);
    }

    #[test]
    fn test_reaccepting_an_instance_keeps_template_id() {
        let instance = meditation().accept(Utc.timestamp_millis_opt(1_000).unwrap());
        let again = instance.accept(Utc.timestamp_millis_opt(5_000).unwrap());
        assert_eq!(again.id, "daily_meditation_5000");
    }

    #[test]
    fn test_list_formatting() {
        let text = format_quest_list("Daily Quests", &[meditation()]);
        assert!(text.contains("1. daily_meditation - Shadow Meditation [easy] +25xp +5sp (10m)"));
        assert!(format_quest_list("Empty", &[]).contains("No quests."));
    }

    #[test]
    fn test_status_lists_requirement_tags() {
        let quest = meditation().with_requirement(QuestRequirement::Level(10));
        let status = format_quest_status(&quest);
        assert!(status.contains("Requires: level_10"));
        assert!(status.contains("Rewards: 25 xp, 5 shadow points"));
    }
}
