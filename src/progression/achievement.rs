//! Achievement and goal projections.
//!
//! Achievements are computed from the current state against fixed
//! thresholds; nothing here mutates state. The session compares the
//! projection with `player.achievements` to decide what to unlock.
use super::types::{Achievement, AchievementCategory, GameState};

struct Threshold {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: AchievementCategory,
    max_progress: u64,
    /// Cap reported progress at `max_progress`. Count-style achievements
    /// keep the raw count.
    clamp: bool,
}

const THRESHOLDS: &[Threshold] = &[
    Threshold {
        id: "first_quest",
        name: "First Steps",
        description: "Complete your first quest",
        category: AchievementCategory::Quests,
        max_progress: 1,
        clamp: true,
    },
    Threshold {
        id: "quest_master",
        name: "Quest Master",
        description: "Complete 10 quests",
        category: AchievementCategory::Quests,
        max_progress: 10,
        clamp: false,
    },
    Threshold {
        id: "level_5",
        name: "Rising Star",
        description: "Reach level 5",
        category: AchievementCategory::Level,
        max_progress: 5,
        clamp: true,
    },
    Threshold {
        id: "level_10",
        name: "Decade Warrior",
        description: "Reach level 10",
        category: AchievementCategory::Level,
        max_progress: 10,
        clamp: true,
    },
    Threshold {
        id: "skill_learner",
        name: "Skill Learner",
        description: "Learn your first skill",
        category: AchievementCategory::Skills,
        max_progress: 1,
        clamp: true,
    },
    Threshold {
        id: "skill_master",
        name: "Skill Master",
        description: "Learn 5 different skills",
        category: AchievementCategory::Skills,
        max_progress: 5,
        clamp: false,
    },
    Threshold {
        id: "streak_3",
        name: "Consistent",
        description: "Maintain a 3-day streak",
        category: AchievementCategory::Streak,
        max_progress: 3,
        clamp: true,
    },
    Threshold {
        id: "streak_7",
        name: "Week Warrior",
        description: "Maintain a 7-day streak",
        category: AchievementCategory::Streak,
        max_progress: 7,
        clamp: true,
    },
    Threshold {
        id: "shadow_points_50",
        name: "Shadow Collector",
        description: "Earn 50 shadow points",
        category: AchievementCategory::Shadow,
        max_progress: 50,
        clamp: true,
    },
    Threshold {
        id: "shadow_points_100",
        name: "Shadow Master",
        description: "Earn 100 shadow points",
        category: AchievementCategory::Shadow,
        max_progress: 100,
        clamp: true,
    },
];

fn counter(state: &GameState, category: AchievementCategory) -> u64 {
    let player = &state.player;
    match category {
        AchievementCategory::Quests => state.quests.completed.len() as u64,
        AchievementCategory::Level => player.level as u64,
        AchievementCategory::Skills => player.skills.len() as u64,
        AchievementCategory::Streak => player.daily_streak as u64,
        AchievementCategory::Shadow => player.shadow_points,
    }
}

/// Every achievement with its current progress, in display order.
pub fn evaluate_achievements(state: &GameState) -> Vec<Achievement> {
    THRESHOLDS
        .iter()
        .map(|t| {
            let value = counter(state, t.category);
            Achievement {
                id: t.id.to_string(),
                name: t.name.to_string(),
                description: t.description.to_string(),
                category: t.category,
                unlocked: value >= t.max_progress,
                progress: if t.clamp {
                    value.min(t.max_progress)
                } else {
                    value
                },
                max_progress: t.max_progress,
            }
        })
        .collect()
}

pub fn achievements_by_category(
    state: &GameState,
    category: AchievementCategory,
) -> Vec<Achievement> {
    evaluate_achievements(state)
        .into_iter()
        .filter(|a| a.category == category)
        .collect()
}

/// Earned in the projection but not yet recorded on the player.
pub fn newly_earned(state: &GameState) -> Vec<Achievement> {
    evaluate_achievements(state)
        .into_iter()
        .filter(|a| a.unlocked && !state.player.has_achievement(&a.id))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub title: &'static str,
    pub description: &'static str,
    pub current: u64,
    pub target: u64,
    pub completed: bool,
}

impl Goal {
    pub fn percent(&self) -> u64 {
        if self.target == 0 {
            return 100;
        }
        (self.current.saturating_mul(100) / self.target).min(100)
    }
}

/// Long-running journal goals.
pub fn progress_goals(state: &GameState) -> Vec<Goal> {
    let player = &state.player;
    let goal = |title: &'static str, description: &'static str, current: u64, target: u64| Goal {
        title,
        description,
        current,
        target,
        completed: current >= target,
    };
    vec![
        goal(
            "Reach Level 10",
            "Continue the journey to become a stronger version of myself",
            player.level as u64,
            10,
        ),
        goal(
            "Learn 5 Skills",
            "Master various abilities across different categories",
            player.skills.len() as u64,
            5,
        ),
        goal(
            "7-Day Streak",
            "Maintain consistency for a full week",
            player.daily_streak as u64,
            7,
        ),
    ]
}

pub fn format_achievements(achievements: &[Achievement]) -> String {
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    let mut out = format!(
        "=== ACHIEVEMENTS {}/{} ===",
        unlocked,
        achievements.len()
    );
    for a in achievements {
        let mark = if a.unlocked { "✓" } else { " " };
        out.push_str(&format!(
            "\n[{}] {} - {} [{}/{}]",
            mark, a.name, a.description, a.progress, a.max_progress
        ));
    }
    out
}

pub fn format_goals(goals: &[Goal]) -> String {
    let mut out = String::from("=== GOALS ===");
    for g in goals {
        out.push_str(&format!(
            "\n{} {}/{} ({}%){}",
            g.title,
            g.current,
            g.target,
            g.percent(),
            if g.completed { " done" } else { "" }
        ));
    }
    out
}
