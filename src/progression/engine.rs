//! The progression reducer.
//!
//! `apply` maps `(state, action)` to the next state. It owns no storage of
//! its own: callers hold the `GameState` and feed it back in, so a session
//! is a fold over actions. Every action is total; nothing here can fail.
use chrono::{DateTime, Utc};
use log::{debug, info};

use super::eligibility::available_quests;
use super::types::{
    Achievement, GameState, Notification, NotificationKind, PlayerPatch, Quest, Skill,
};

/// Max health gained per level.
pub const LEVEL_UP_HEALTH: u32 = 10;
/// Max mana gained per level.
pub const LEVEL_UP_MANA: u32 = 5;
/// Each base stat gains this much per level.
pub const LEVEL_UP_STAT: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add experience, levelling up at most once.
    GrantExperience(u64),
    /// Append an already-stamped instance to the active set.
    AcceptQuest(Quest),
    /// Move a quest to the completed set and pay its rewards directly.
    CompleteQuest(Quest),
    SetStats(PlayerPatch),
    /// Record a skill. Effects are applied separately through `SetStats`.
    LearnSkill(Skill),
    UnlockAchievement(Achievement),
    AdvanceShadowRank,
    DismissNotification(u64),
    /// Update the daily streak for a login at the current time.
    RecordLogin,
    PushNotification {
        kind: NotificationKind,
        message: String,
    },
    /// Recompute `quests.available` from the catalog.
    RefreshAvailableQuests,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::GrantExperience(_) => "grant_experience",
            Action::AcceptQuest(_) => "accept_quest",
            Action::CompleteQuest(_) => "complete_quest",
            Action::SetStats(_) => "set_stats",
            Action::LearnSkill(_) => "learn_skill",
            Action::UnlockAchievement(_) => "unlock_achievement",
            Action::AdvanceShadowRank => "advance_shadow_rank",
            Action::DismissNotification(_) => "dismiss_notification",
            Action::RecordLogin => "record_login",
            Action::PushNotification { .. } => "push_notification",
            Action::RefreshAvailableQuests => "refresh_available_quests",
        }
    }
}

/// Apply `action` using the wall clock for timestamps.
pub fn apply(state: GameState, action: Action) -> GameState {
    apply_at(state, action, Utc::now())
}

/// Apply `action` with an explicit clock reading.
pub fn apply_at(mut state: GameState, action: Action, now: DateTime<Utc>) -> GameState {
    debug!("apply {}", action.name());
    match action {
        Action::GrantExperience(amount) => grant_experience(&mut state, amount, now),
        Action::AcceptQuest(quest) => {
            debug!("quest accepted: {}", quest.id);
            state.quests.active.push(quest);
        }
        Action::CompleteQuest(quest) => complete_quest(&mut state, quest),
        Action::SetStats(patch) => state.player.apply_patch(patch),
        Action::LearnSkill(skill) => {
            debug!("skill recorded: {}", skill.id);
            state.player.skills.push(skill);
        }
        Action::UnlockAchievement(achievement) => {
            let message = format!("Achievement Unlocked: {}", achievement.name);
            info!("{}", message);
            state.player.achievements.push(achievement);
            push_notification(&mut state, NotificationKind::Achievement, message, now);
        }
        Action::AdvanceShadowRank => {
            let from = state.player.shadow_rank;
            state.player.shadow_rank = from.next();
            if from != state.player.shadow_rank {
                info!("shadow rank {} -> {}", from, state.player.shadow_rank);
            }
        }
        Action::DismissNotification(id) => {
            state.system.notifications.retain(|n| n.id != id);
        }
        Action::RecordLogin => record_login(&mut state, now),
        Action::PushNotification { kind, message } => {
            push_notification(&mut state, kind, message, now)
        }
        Action::RefreshAvailableQuests => {
            state.quests.available =
                available_quests(state.player.level, state.player.skills.len());
        }
    }
    state
}

fn grant_experience(state: &mut GameState, amount: u64, now: DateTime<Utc>) {
    let player = &mut state.player;
    let total = player.experience.saturating_add(amount);
    if total < player.experience_to_next {
        player.experience = total;
        return;
    }

    // One level per call; any surplus carries but is not re-checked.
    player.experience = total - player.experience_to_next;
    player.level = player.level.saturating_add(1);
    player.experience_to_next = player
        .experience_to_next
        .saturating_add(player.experience_to_next / 2);
    player.max_health = player.max_health.saturating_add(LEVEL_UP_HEALTH);
    player.health = player.max_health;
    player.max_mana = player.max_mana.saturating_add(LEVEL_UP_MANA);
    player.mana = player.max_mana;
    player.strength = player.strength.saturating_add(LEVEL_UP_STAT);
    player.intelligence = player.intelligence.saturating_add(LEVEL_UP_STAT);
    player.agility = player.agility.saturating_add(LEVEL_UP_STAT);
    player.charisma = player.charisma.saturating_add(LEVEL_UP_STAT);

    let message = format!("Level Up! You are now level {}!", player.level);
    info!("{} ({} xp carried)", message, player.experience);
    push_notification(state, NotificationKind::LevelUp, message, now);
}

fn complete_quest(state: &mut GameState, quest: Quest) {
    if let Some(pos) = state.quests.active.iter().position(|q| q.id == quest.id) {
        state.quests.active.remove(pos);
    } else {
        debug!("completing quest {} that was not active", quest.id);
    }
    let player = &mut state.player;
    player.experience = player.experience.saturating_add(quest.experience_reward);
    player.shadow_points = player.shadow_points.saturating_add(quest.shadow_points_reward);
    info!(
        "quest complete: {} (+{} xp, +{} sp)",
        quest.id, quest.experience_reward, quest.shadow_points_reward
    );
    state.quests.completed.push(quest);
}

fn record_login(state: &mut GameState, now: DateTime<Utc>) {
    let player = &mut state.player;
    let today = now.date_naive();
    player.daily_streak = match player.last_login {
        None => 1,
        Some(last) => match (today - last.date_naive()).num_days() {
            d if d <= 0 => player.daily_streak.max(1),
            1 => player.daily_streak.saturating_add(1),
            _ => 1,
        },
    };
    player.last_login = Some(now);
}

fn push_notification(
    state: &mut GameState,
    kind: NotificationKind,
    message: String,
    now: DateTime<Utc>,
) {
    let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let id = match state.system.notifications.iter().map(|n| n.id).max() {
        Some(last) if last >= stamp => last + 1,
        _ => stamp,
    };
    state.system.notifications.push(Notification {
        id,
        kind,
        message,
        timestamp: now,
    });
}
