//! Terminal host for the Petling virtual pet.
//!
//! Wires the pet engine to a terminal, a timer set, and the tiered
//! snapshot store, then runs one event loop until the player quits.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `petling-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Build the tiered store (remote tier only when a URL is configured)
//! 4. Load the saved pet, catching it up to now
//! 5. Run the event loop: stdin commands, autosave, passive income, refresh
//! 6. Save once more on exit (quit, end of input, Ctrl-C)
//!
//! Every trigger is handled inside a single `select!`, so at most one
//! mutation of the pet is ever in flight.

mod command;
mod error;
mod session;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use petling_core::PetlingConfig;
use petling_core::config::{LoggingConfig, StorageConfig, TimerConfig};
use petling_store::{FileStore, PetStore, RedisStore, TieredStore, load_pet, save_pet};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::error::HostError;
use crate::session::Session;

/// Default configuration file, relative to the working directory.
const CONFIG_FILE: &str = "petling-config.yaml";

/// How long to wait for the remote tier before running local-only.
const REMOTE_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// The store the host persists through.
type HostStore = TieredStore<RedisStore, FileStore>;

/// Application entry point for the host.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded.
#[tokio::main]
async fn main() -> Result<(), HostError> {
    // 1. Load configuration.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("petling-host starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        save_path = %config.storage.save_path.display(),
        remote = config.storage.remote_url.is_some(),
        autosave_secs = config.timers.autosave_secs,
        passive_income_secs = config.timers.passive_income_secs,
        refresh_secs = config.timers.refresh_secs,
        "Configuration loaded"
    );

    // 3. Build the store.
    let store = build_store(&config.storage).await;

    // 4. Load the saved pet.
    let now = Utc::now();
    let pet = load_pet(&store, now, &config.care).await;
    let timers = config.timers.clone();
    let mut session = Session::new(config, pet);
    greet(&mut session);

    // 5. Event loop.
    let stdin = BufReader::new(tokio::io::stdin());
    run(&mut session, &store, &timers, stdin).await;

    // 6. Final save.
    persist(&store, &session).await;
    if let Some(remote) = store.remote()
        && let Err(e) = remote.disconnect().await
    {
        warn!(error = %e, "Remote store did not close cleanly");
    }
    info!("petling-host shutdown complete");
    Ok(())
}

/// Read commands and timer ticks until the player leaves.
///
/// Unreadable input ends the loop like end of input does, so the caller's
/// final save still runs.
async fn run<I>(session: &mut Session, store: &HostStore, timers: &TimerConfig, input: I)
where
    I: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut autosave = periodic(timers.autosave_secs);
    let mut income = periodic(timers.passive_income_secs);
    let mut refresh = periodic(timers.refresh_secs);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        info!("Input closed");
                        return;
                    }
                    Err(e) => {
                        warn!(error = %e, "Input unreadable, shutting down");
                        return;
                    }
                };
                match command::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => {
                        println!("Goodbye!");
                        return;
                    }
                    Ok(Some(Command::Save)) => {
                        if persist(store, session).await {
                            println!("Saved.");
                        } else {
                            println!("Could not save right now; your pet is safe in memory.");
                        }
                    }
                    Ok(Some(command)) => {
                        println!("{}", session.execute(command, Utc::now()));
                    }
                    Err(e) => println!("{e}"),
                }
            }
            _ = autosave.tick() => {
                persist(store, session).await;
            }
            _ = income.tick() => {
                if let Some(notice) = session.collect_income(Utc::now()) {
                    println!("{notice}");
                }
            }
            _ = refresh.tick() => {
                if let Some(notice) = session.refresh(Utc::now()) {
                    println!("{notice}");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                return;
            }
        }
    }
}

/// Catch a loaded pet up and tell the player where things stand.
fn greet(session: &mut Session) {
    let now = Utc::now();
    let refreshed = session.refresh(now);
    let income = session.collect_income(now);

    if session.pet().is_none() {
        println!("Welcome to Petling! Type `new <name>` to hatch a pet, or `help`.");
        return;
    }
    println!("{}", session.execute(Command::Status, now));
    for notice in [refreshed, income].into_iter().flatten() {
        println!("{notice}");
    }
}

/// Save the pet if there is one. Returns whether the save went through.
/// Failures are logged and the pet keeps running in memory.
async fn persist(store: &HostStore, session: &Session) -> bool {
    let Some(pet) = session.pet() else {
        return true;
    };
    match save_pet(store, pet).await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, tier = store.tier(), "Save failed");
            false
        }
    }
}

/// An interval whose first tick is one full period from now.
fn periodic(secs: u64) -> tokio::time::Interval {
    let period = Duration::from_secs(secs.max(1));
    let start = Instant::now();
    let mut timer = interval_at(start.checked_add(period).unwrap_or(start), period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Build the tiered store. An unreachable remote tier is logged and
/// skipped so the pet still persists locally.
async fn build_store(storage: &StorageConfig) -> HostStore {
    let local = FileStore::new(&storage.save_path);
    let Some(url) = storage.remote_url.as_deref() else {
        return TieredStore::new(None, local);
    };

    let remote = match tokio::time::timeout(
        REMOTE_CONNECT_TIMEOUT,
        RedisStore::connect(url, &storage.key),
    )
    .await
    {
        Ok(Ok(remote)) => Some(remote),
        Ok(Err(e)) => {
            warn!(error = %e, "Remote store unavailable, saving locally only");
            None
        }
        Err(_) => {
            warn!(
                timeout_secs = REMOTE_CONNECT_TIMEOUT.as_secs(),
                "Remote store timed out, saving locally only"
            );
            None
        }
    };
    TieredStore::new(remote, local)
}

/// Load configuration from the first argument or `petling-config.yaml`.
///
/// A missing default file yields the built-in defaults; a missing file
/// that was asked for explicitly is an error. The returned flag says
/// whether a file was read.
fn load_config() -> Result<(PetlingConfig, bool), HostError> {
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    if explicit.is_some() || Path::new(&config_path).exists() {
        Ok((PetlingConfig::from_file(&config_path)?, true))
    } else {
        Ok((PetlingConfig::parse("")?, false))
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the configured
/// level. Logs go to stderr so they do not interleave with the game.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
