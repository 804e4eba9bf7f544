//! Session handle: owns the single `GameState`, routes every change through
//! the reducer and writes the snapshot after each transition.
//!
//! Catalog lookups and eligibility checks live here rather than in the
//! engine, which accepts whatever it is given.
use chrono::Utc;
use log::{debug, info, warn};

use super::achievement::newly_earned;
use super::catalog::{quest_by_id, skill_by_id};
use super::eligibility::{quest_unlocked, requirements_met};
use super::engine::{apply, Action};
use super::errors::ProgressionError;
use super::player::DEFAULT_PLAYER_NAME;
use super::skill::effects_patch;
use super::storage::SnapshotStore;
use super::types::{
    Achievement, GameState, Notification, NotificationKind, Player, PlayerPatch, Quest,
    ShadowRank, Skill,
};

/// Behaviour switches for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Name given to a fresh player when no snapshot exists.
    pub player_name: String,
    /// Keep levelling while experience is at or above the threshold.
    pub cascade_level_ups: bool,
    /// Run the level-up check after quest rewards are paid.
    pub settle_quest_experience: bool,
    pub dark_mode: bool,
    pub sound_enabled: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            cascade_level_ups: true,
            settle_quest_experience: true,
            dark_mode: true,
            sound_enabled: true,
        }
    }
}

pub struct GameSession<S: SnapshotStore> {
    state: GameState,
    store: S,
    options: SessionOptions,
}

impl<S: SnapshotStore> GameSession<S> {
    /// Restore from `store`, falling back to a fresh player when nothing
    /// usable is saved.
    pub fn open(store: S, options: SessionOptions) -> Self {
        let player = match store.load_player() {
            Ok(Some(player)) => {
                debug!("restored player '{}' at level {}", player.name, player.level);
                player
            }
            Ok(None) => {
                info!("no saved state, starting '{}'", options.player_name);
                Player::new(&options.player_name)
            }
            Err(e) => {
                warn!("failed to load player snapshot, starting fresh: {}", e);
                Player::new(&options.player_name)
            }
        };
        let quests = match store.load_quest_log() {
            Ok(quests) => quests.unwrap_or_default(),
            Err(e) => {
                warn!("failed to load quest log: {}", e);
                Default::default()
            }
        };

        let mut state = GameState::new(player);
        state.quests = quests;
        state.system.dark_mode = options.dark_mode;
        state.system.sound_enabled = options.sound_enabled;
        let state = apply(state, Action::RefreshAvailableQuests);

        Self {
            state,
            store,
            options,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one action and persist the result.
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = apply(state, action);
        self.persist();
    }

    /// Best effort; a failed write keeps the in-memory state.
    fn persist(&self) {
        if let Err(e) = self.store.save_player(&self.state.player) {
            warn!("failed to save player snapshot: {}", e);
        }
        if let Err(e) = self.store.save_quest_log(&self.state.quests) {
            warn!("failed to save quest log: {}", e);
        }
    }

    fn level_up_pending(&self) -> bool {
        let player = &self.state.player;
        player.experience_to_next > 0 && player.experience >= player.experience_to_next
    }

    /// Apply pending level-ups, once or until settled depending on options.
    /// The snapshot is written once after the last level.
    fn settle_levels(&mut self) {
        let mut levelled = false;
        while self.level_up_pending() {
            let threshold = self.state.player.experience_to_next;
            let state = std::mem::take(&mut self.state);
            self.state = apply(state, Action::GrantExperience(0));
            levelled = true;
            // A threshold that cannot grow would level once per point of experience.
            if !self.options.cascade_level_ups || self.state.player.experience_to_next <= threshold
            {
                break;
            }
        }
        if levelled {
            self.persist();
        }
    }

    /// Level and skill changes can unlock quests and achievements.
    fn after_progress(&mut self) {
        self.dispatch(Action::RefreshAvailableQuests);
        self.sync_achievements();
    }

    pub fn grant_experience(&mut self, amount: u64) {
        self.dispatch(Action::GrantExperience(amount));
        if self.options.cascade_level_ups {
            self.settle_levels();
        }
        self.after_progress();
    }

    /// Start a catalog quest. Returns the stamped instance.
    pub fn accept_quest(&mut self, template_id: &str) -> Result<Quest, ProgressionError> {
        let template = quest_by_id(template_id)
            .ok_or_else(|| ProgressionError::NotFound(format!("quest: {}", template_id)))?;
        let player = &self.state.player;
        if !quest_unlocked(template, player.level, player.skills.len()) {
            return Err(ProgressionError::Locked(format!("quest: {}", template_id)));
        }
        let instance = template.accept(Utc::now());
        self.dispatch(Action::AcceptQuest(instance.clone()));
        Ok(instance)
    }

    /// Complete an active quest by instance id.
    pub fn complete_quest(&mut self, instance_id: &str) -> Result<Quest, ProgressionError> {
        let mut quest = self
            .state
            .quests
            .active
            .iter()
            .find(|q| q.id == instance_id)
            .cloned()
            .ok_or_else(|| ProgressionError::NotFound(format!("active quest: {}", instance_id)))?;
        quest.completed = true;

        let message = format!(
            "Quest Complete: {} (+{} XP, +{} SP)",
            quest.name, quest.experience_reward, quest.shadow_points_reward
        );
        self.dispatch(Action::CompleteQuest(quest.clone()));
        self.dispatch(Action::PushNotification {
            kind: NotificationKind::QuestComplete,
            message,
        });
        if self.options.settle_quest_experience {
            self.settle_levels();
        }
        self.after_progress();
        Ok(quest)
    }

    /// Learn a catalog skill and apply its effects to the player.
    pub fn learn_skill(&mut self, skill_id: &str) -> Result<Skill, ProgressionError> {
        let template = skill_by_id(skill_id)
            .ok_or_else(|| ProgressionError::NotFound(format!("skill: {}", skill_id)))?;
        let player = &self.state.player;
        if player.has_skill(skill_id) {
            return Err(ProgressionError::AlreadyLearned(skill_id.to_string()));
        }
        if !requirements_met(
            &template.requirements,
            player.level,
            &player.core_stats(),
            player.shadow_points,
            player.shadow_rank,
        ) {
            return Err(ProgressionError::Locked(format!("skill: {}", skill_id)));
        }

        let skill = template.learned(Utc::now());
        let patch = effects_patch(player, &skill);
        self.dispatch(Action::LearnSkill(skill.clone()));
        if !patch.is_empty() {
            self.dispatch(Action::SetStats(patch));
        }
        self.dispatch(Action::PushNotification {
            kind: NotificationKind::SkillLearned,
            message: format!("Skill Learned: {}", skill.name),
        });
        self.after_progress();
        Ok(skill)
    }

    /// Unlock every earned achievement not yet on the player.
    pub fn sync_achievements(&mut self) -> Vec<Achievement> {
        let earned = newly_earned(&self.state);
        for achievement in &earned {
            self.dispatch(Action::UnlockAchievement(achievement.clone()));
        }
        earned
    }

    pub fn advance_rank(&mut self) -> ShadowRank {
        self.dispatch(Action::AdvanceShadowRank);
        self.state.player.shadow_rank
    }

    /// Returns the streak after this login.
    pub fn record_login(&mut self) -> u32 {
        self.dispatch(Action::RecordLogin);
        self.sync_achievements();
        self.state.player.daily_streak
    }

    pub fn update_stats(&mut self, patch: PlayerPatch) {
        self.dispatch(Action::SetStats(patch));
    }

    pub fn dismiss_notification(&mut self, id: u64) {
        self.dispatch(Action::DismissNotification(id));
    }

    /// Dismiss and return every queued notification, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let pending = self.state.system.notifications.clone();
        for note in &pending {
            self.dispatch(Action::DismissNotification(note.id));
        }
        pending
    }

    /// Drop the saved snapshot and start over with a fresh player.
    pub fn reset(&mut self) {
        info!("resetting progress for '{}'", self.options.player_name);
        if let Err(e) = self.store.clear() {
            warn!("failed to clear saved progress: {}", e);
        }
        let mut state = GameState::new(Player::new(&self.options.player_name));
        state.system.dark_mode = self.options.dark_mode;
        state.system.sound_enabled = self.options.sound_enabled;
        self.state = state;
        self.dispatch(Action::RefreshAvailableQuests);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::types::QuestLog;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MemoryStore {
        player: RefCell<Option<Player>>,
        quests: RefCell<Option<QuestLog>>,
        writes: Cell<usize>,
        clears: Cell<usize>,
    }

    impl SnapshotStore for MemoryStore {
        fn load_player(&self) -> Result<Option<Player>, ProgressionError> {
            Ok(self.player.borrow().clone())
        }
        fn save_player(&self, player: &Player) -> Result<(), ProgressionError> {
            self.writes.set(self.writes.get() + 1);
            *self.player.borrow_mut() = Some(player.clone());
            Ok(())
        }
        fn load_quest_log(&self) -> Result<Option<QuestLog>, ProgressionError> {
            Ok(self.quests.borrow().clone())
        }
        fn save_quest_log(&self, quests: &QuestLog) -> Result<(), ProgressionError> {
            *self.quests.borrow_mut() = Some(quests.clone());
            Ok(())
        }
        fn clear(&self) -> Result<(), ProgressionError> {
            self.clears.set(self.clears.get() + 1);
            *self.player.borrow_mut() = None;
            *self.quests.borrow_mut() = None;
            Ok(())
        }
    }

    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn load_player(&self) -> Result<Option<Player>, ProgressionError> {
            Err(ProgressionError::NotFound("disk".into()))
        }
        fn save_player(&self, _: &Player) -> Result<(), ProgressionError> {
            Err(ProgressionError::NotFound("disk".into()))
        }
        fn load_quest_log(&self) -> Result<Option<QuestLog>, ProgressionError> {
            Err(ProgressionError::NotFound("disk".into()))
        }
        fn save_quest_log(&self, _: &QuestLog) -> Result<(), ProgressionError> {
            Err(ProgressionError::NotFound("disk".into()))
        }
        fn clear(&self) -> Result<(), ProgressionError> {
            Err(ProgressionError::NotFound("disk".into()))
        }
    }

    fn session() -> GameSession<MemoryStore> {
        GameSession::open(MemoryStore::default(), SessionOptions::default())
    }

    #[test]
    fn test_fresh_session_uses_configured_name() {
        let options = SessionOptions {
            player_name: "Cha Hae-In".into(),
            ..Default::default()
        };
        let s = GameSession::open(MemoryStore::default(), options);
        assert_eq!(s.player().name, "Cha Hae-In");
        assert_eq!(s.state().quests.available.len(), 10);
    }

    #[test]
    fn test_every_transition_is_persisted() {
        let mut s = session();
        s.grant_experience(10);
        assert!(s.store().writes.get() >= 1);
        assert_eq!(s.store().player.borrow().as_ref().map(|p| p.experience), Some(10));
    }

    #[test]
    fn test_cascade_consumes_large_grants() {
        let mut s = session();
        s.grant_experience(1000);
        // 100 + 150 + 225 + 337 = 812 spent over four levels
        assert_eq!(s.player().level, 5);
        assert_eq!(s.player().experience, 188);
        assert_eq!(s.player().experience_to_next, 505);
        assert!(s.player().has_achievement("level_5"));
    }

    #[test]
    fn test_cascade_stops_when_threshold_cannot_grow() {
        let mut s = session();
        s.update_stats(PlayerPatch {
            experience_to_next: Some(1),
            ..Default::default()
        });
        s.grant_experience(2000);
        assert_eq!(s.player().level, 3);
        assert_eq!(s.player().experience, 1998);
        let level_ups = s
            .state()
            .system
            .notifications
            .iter()
            .filter(|n| n.kind == NotificationKind::LevelUp)
            .count();
        assert_eq!(level_ups, 2);
    }

    #[test]
    fn test_cascade_writes_snapshot_once() {
        let mut s = session();
        s.grant_experience(1000);
        assert_eq!(s.player().level, 5);
        // grant, settled levels, quest refresh, then one per unlocked achievement
        let expected = 3 + s.player().achievements.len();
        assert_eq!(s.store().writes.get(), expected);
        assert_eq!(s.store().player.borrow().as_ref().map(|p| p.level), Some(5));
    }

    #[test]
    fn test_single_step_when_cascade_disabled() {
        let options = SessionOptions {
            cascade_level_ups: false,
            ..Default::default()
        };
        let mut s = GameSession::open(MemoryStore::default(), options);
        s.grant_experience(1000);
        assert_eq!(s.player().level, 2);
        assert_eq!(s.player().experience, 900);
    }

    #[test]
    fn test_quest_flow_pays_and_settles() {
        let mut s = session();
        let quest = s.accept_quest("daily_exercise").expect("accept");
        assert!(quest.id.starts_with("daily_exercise_"));
        assert_eq!(s.state().quests.active.len(), 1);

        s.update_stats(PlayerPatch {
            experience: Some(70),
            ..Default::default()
        });
        s.complete_quest(&quest.id).expect("complete");
        assert!(s.state().quests.active.is_empty());
        assert_eq!(s.player().level, 2);
        assert_eq!(s.player().experience, 20);
        assert_eq!(s.player().shadow_points, 10);
        assert!(s.player().has_achievement("first_quest"));

        let kinds: Vec<NotificationKind> =
            s.state().system.notifications.iter().map(|n| n.kind).collect();
        assert!(kinds.contains(&NotificationKind::QuestComplete));
        assert!(kinds.contains(&NotificationKind::LevelUp));
        assert!(kinds.contains(&NotificationKind::Achievement));
    }

    #[test]
    fn test_unsettled_quest_leaves_experience_over_threshold() {
        let options = SessionOptions {
            settle_quest_experience: false,
            ..Default::default()
        };
        let mut s = GameSession::open(MemoryStore::default(), options);
        let quest = s.accept_quest("weekly_skill").expect("accept");
        s.complete_quest(&quest.id).expect("complete");
        assert_eq!(s.player().level, 1);
        assert_eq!(s.player().experience, 200);
    }

    #[test]
    fn test_accept_and_complete_errors() {
        let mut s = session();
        assert!(matches!(
            s.accept_quest("nope"),
            Err(ProgressionError::NotFound(_))
        ));
        assert!(matches!(
            s.accept_quest("level_50"),
            Err(ProgressionError::Locked(_))
        ));
        assert!(matches!(
            s.complete_quest("daily_water_1"),
            Err(ProgressionError::NotFound(_))
        ));
    }

    #[test]
    fn test_learning_applies_effects_once() {
        let mut s = session();
        s.learn_skill("shadow_step").expect("learn");
        assert_eq!(s.player().agility, 12);
        assert_eq!(s.player().skills.len(), 1);
        assert!(s.player().skills[0].learned_at.is_some());
        assert!(s.player().has_achievement("skill_learner"));

        assert!(matches!(
            s.learn_skill("shadow_step"),
            Err(ProgressionError::AlreadyLearned(_))
        ));
        assert!(matches!(
            s.learn_skill("shadow_army"),
            Err(ProgressionError::Locked(_))
        ));
        assert_eq!(s.player().agility, 12);
    }

    #[test]
    fn test_achievements_unlock_exactly_once() {
        let mut s = session();
        s.update_stats(PlayerPatch {
            shadow_points: Some(60),
            ..Default::default()
        });
        assert_eq!(s.sync_achievements().len(), 1);
        assert!(s.sync_achievements().is_empty());
        assert_eq!(s.player().achievements.len(), 1);
    }

    #[test]
    fn test_drain_empties_queue_in_order() {
        let mut s = session();
        s.grant_experience(100);
        let drained = s.drain_notifications();
        assert_eq!(drained[0].kind, NotificationKind::LevelUp);
        assert!(s.state().system.notifications.is_empty());
    }

    #[test]
    fn test_broken_store_never_rolls_back() {
        let mut s = GameSession::open(BrokenStore, SessionOptions::default());
        assert_eq!(s.player().level, 1);
        s.grant_experience(150);
        assert_eq!(s.player().level, 2);
        assert_eq!(s.advance_rank(), ShadowRank::E);
    }

    #[test]
    fn test_reset_restores_fresh_player() {
        let mut s = session();
        s.grant_experience(500);
        s.accept_quest("daily_water").expect("accept");
        s.reset();
        assert_eq!(s.player().level, 1);
        assert!(s.state().quests.active.is_empty());
        assert_eq!(s.store().player.borrow().as_ref().map(|p| p.level), Some(1));
        assert_eq!(s.store().clears.get(), 1);
    }

    #[test]
    fn test_reset_survives_failed_clear() {
        let mut s = GameSession::open(BrokenStore, SessionOptions::default());
        s.grant_experience(150);
        s.reset();
        assert_eq!(s.player().level, 1);
        assert_eq!(s.player().experience, 0);
    }
}
