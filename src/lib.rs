//! # Shadowquest - gamified self-improvement tracker
//!
//! A player earns experience and shadow points by completing real-life
//! quests, levels up, learns skills gated on stats and shadow rank, and
//! unlocks achievements along the way.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shadowquest::config::Config;
//! use shadowquest::progression::{GameSession, SledSnapshotStoreBuilder};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("shadowquest.toml")?;
//!     let store = SledSnapshotStoreBuilder::new(&config.storage.data_dir)
//!         .with_key(config.storage.snapshot_key.clone())
//!         .open()?;
//!     let mut session = GameSession::open(store, config.session_options());
//!
//!     let quest = session.accept_quest("daily_meditation")?;
//!     session.complete_quest(&quest.id)?;
//!     println!("level {}", session.player().level);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`progression`] - state model, reducer, catalogs, eligibility, persistence and session
//! - [`config`] - TOML configuration
//!
//! ```text
//! ┌─────────────────┐
//! │   GameSession   │ ← lookups, eligibility checks, persistence
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ engine::apply   │ ← pure (state, action) -> state
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ SnapshotStore   │ ← sled-backed JSON snapshot
//! └─────────────────┘
//! ```

pub mod config;
pub mod progression;
