//! Binary entrypoint for the shadowquest CLI.
//!
//! Commands:
//! - `init` - write a starter `shadowquest.toml` and an initial snapshot
//! - `status` - print the player card
//! - `gain <amount>` - grant experience
//! - `quests [--category <c>] [--all]`, `daily`, `accept <id>`, `active`, `complete <instance>`
//! - `skills [--category <c>]`, `learn <id>`
//! - `achievements`, `goals`, `rank-up`, `login`, `reset`
//!
//! Notifications raised by a command are printed and then dismissed.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use shadowquest::config::{Config, DEFAULT_CONFIG_PATH};
use shadowquest::progression::{
    available_quests, available_skills, evaluate_achievements, format_achievements, format_goals,
    format_player_status, format_quest_list, format_quest_status, format_skill_line,
    progress_goals, quest, quest_catalog, quests_by_category, random_daily_quest, skill,
    skill_catalog, Action, GameSession, QuestCategory, SkillCategory, SledSnapshotStore,
    SledSnapshotStoreBuilder,
};

#[derive(Parser)]
#[command(name = "shadowquest")]
#[command(about = "Level up your real life: quests, skills and shadow ranks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and start a fresh player
    Init,
    /// Show the player card
    Status,
    /// Grant experience points
    Gain { amount: u64 },
    /// List quests open to the player
    Quests {
        /// daily, weekly, achievement or special
        #[arg(long)]
        category: Option<QuestCategory>,
        /// Include locked quests
        #[arg(long)]
        all: bool,
    },
    /// Suggest a random daily quest
    Daily,
    /// Accept a quest by catalog id
    Accept { quest_id: String },
    /// List accepted quests
    Active,
    /// Complete an accepted quest by instance id
    Complete { instance_id: String },
    /// List skills with their status
    Skills {
        /// physical, mental, social or shadow
        #[arg(long)]
        category: Option<SkillCategory>,
    },
    /// Learn a skill by catalog id
    Learn { skill_id: String },
    /// Show achievement progress
    Achievements,
    /// Show long-running goals
    Goals,
    /// Advance the shadow rank one step
    RankUp,
    /// Record today's login for the daily streak
    Login,
    /// Discard all progress
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?;
    init_logging(&config, cli.verbose);
    debug!("using data dir {}", config.storage.data_dir);

    let mut session = open_session(&config)?;

    match cli.command {
        Commands::Init => {
            if std::path::Path::new(&cli.config).exists() {
                println!("Config {} already exists, leaving it in place.", cli.config);
            } else {
                Config::create_default(&cli.config)?;
                println!("Created {}", cli.config);
            }
            session.dispatch(Action::RefreshAvailableQuests);
            info!("initialised data dir {}", config.storage.data_dir);
            println!("{}", format_player_status(session.player()));
        }
        Commands::Status => println!("{}", format_player_status(session.player())),
        Commands::Gain { amount } => {
            session.grant_experience(amount);
            println!("+{} XP", amount);
        }
        Commands::Quests { category, all } => {
            let player = session.player();
            let mut quests = if all {
                quest_catalog().to_vec()
            } else {
                available_quests(player.level, player.skills.len())
            };
            let mut title = if all { "All Quests" } else { "Available Quests" };
            if let Some(category) = category {
                let keep = quests_by_category(category);
                quests.retain(|q| keep.iter().any(|k| k.id == q.id));
                title = quest::category_label(category);
            }
            println!("{}", format_quest_list(title, &quests));
        }
        Commands::Daily => {
            let quest = random_daily_quest(&mut rand::thread_rng())
                .ok_or_else(|| anyhow!("no daily quests in catalog"))?;
            println!("{}", format_quest_status(&quest));
        }
        Commands::Accept { quest_id } => {
            let quest = session.accept_quest(&quest_id)?;
            println!("Accepted {} as {}", quest.name, quest.id);
        }
        Commands::Active => {
            println!(
                "{}",
                format_quest_list("ACTIVE QUESTS", &session.state().quests.active)
            );
        }
        Commands::Complete { instance_id } => {
            let quest = session.complete_quest(&instance_id)?;
            println!("Completed {}", quest.name);
        }
        Commands::Skills { category } => {
            let player = session.player();
            let open: Vec<String> = available_skills(
                player.level,
                &player.core_stats(),
                player.shadow_points,
                player.shadow_rank,
            )
            .into_iter()
            .map(|s| s.id)
            .collect();
            if let Some(category) = category {
                println!("=== {} Skills ===", skill::category_label(category));
            }
            for skill in skill_catalog()
                .iter()
                .filter(|s| category.map_or(true, |c| s.category == c))
            {
                let status = if player.has_skill(&skill.id) {
                    "learned"
                } else if open.contains(&skill.id) {
                    "available"
                } else {
                    "locked"
                };
                println!("{}", format_skill_line(skill, status));
            }
        }
        Commands::Learn { skill_id } => {
            let skill = session.learn_skill(&skill_id)?;
            println!("Learned {}", skill.name);
        }
        Commands::Achievements => {
            println!("{}", format_achievements(&evaluate_achievements(session.state())));
        }
        Commands::Goals => println!("{}", format_goals(&progress_goals(session.state()))),
        Commands::RankUp => {
            if session.player().shadow_rank.is_max() {
                println!("Already at the highest rank.");
            } else {
                let rank = session.advance_rank();
                println!("Shadow rank: {}", rank);
            }
        }
        Commands::Login => {
            let streak = session.record_login();
            println!("Daily streak: {} day(s)", streak);
        }
        Commands::Reset => {
            session.reset();
            println!("Progress reset.");
        }
    }

    for note in session.drain_notifications() {
        println!("* {}", note.message);
    }
    Ok(())
}

fn open_session(config: &Config) -> Result<GameSession<SledSnapshotStore>> {
    let store = SledSnapshotStoreBuilder::new(&config.storage.data_dir)
        .with_key(config.storage.snapshot_key.clone())
        .open()
        .map_err(|e| anyhow!("Failed to open store {}: {}", config.storage.data_dir, e))?;
    Ok(GameSession::open(store, config.session_options()))
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .logging
            .level
            .parse()
            .unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.logging.file.as_ref().and_then(|file| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .ok()
    });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Mirror to the console only when someone is watching
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
