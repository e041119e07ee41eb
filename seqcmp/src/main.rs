//! seqcmp: side-by-side comparison of captured HTTP request sequences.
//!
//! Entry point for the `seqcmp` binary. Wires together configuration (`config`),
//! capture loading (`capture`), the terminal lifecycle (`tui`), the unified event
//! bus (`event`), the background diff worker (`worker`) and the UI (`ui`).
//!
//! # Startup sequence
//!
//! 1. Parse arguments, load config and start logging. Read-only, safe before
//!    terminal init; errors here print to stderr.
//! 2. Load every capture into the `SyncController` and pick the active pair.
//! 3. Spawn the diff worker thread.
//! 4. `install_panic_hook()`, then `register_sigterm()`.
//! 5. `init_tui()` enters the alternate screen and raw mode.
//! 6. Create the event channel and `spawn_event_task()`.
//!
//! `restore_tui()` is called once after the event loop exits. The loop never
//! returns early; a failed draw is logged and breaks out through the same exit.

mod app;
mod capture;
mod config;
mod event;
mod theme;
mod tui;
mod ui;
mod worker;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use clap::Parser;
use seqcmp_core::{SequenceId, Side, SyncController};
use tracing_subscriber::EnvFilter;

use crate::ui::keybindings::{self, KeyAction};

/// Compare captured HTTP request sequences side by side.
#[derive(Debug, Parser)]
#[command(name = "seqcmp", version, about)]
struct Cli {
    /// Capture files (TOML), one sequence each.
    #[arg(required = true)]
    captures: Vec<PathBuf>,

    /// Sequence shown first, counting from 1 in argument order.
    #[arg(long, value_name = "N")]
    first: Option<usize>,

    /// Sequence shown second, counting from 1 in argument order.
    #[arg(long, value_name = "N")]
    second: Option<usize>,

    /// Start by comparing responses instead of requests.
    #[arg(long)]
    response: bool,

    /// Config file to use instead of the XDG default.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Installs the global subscriber. The filter comes from `SEQCMP_LOG` and
/// defaults to `info`; without a log file all output is discarded.
fn init_logging(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_env("SEQCMP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let file = log_file.and_then(|path| match File::create(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("seqcmp: cannot open log file {}: {e}", path.display());
            None
        }
    });
    match file {
        Some(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
}

/// Loads the config, falling back to defaults on any error.
fn load_config(cli: &Cli) -> config::Config {
    let path = cli.config.clone().unwrap_or_else(config::config_path);
    config::load_config(&path).unwrap_or_else(|e| {
        eprintln!("seqcmp: {e}; using defaults");
        config::Config::default()
    })
}

/// Loads every capture into a fresh controller. Returns the ids in argument order.
fn load_sequences(paths: &[PathBuf]) -> io::Result<(SyncController, Vec<SequenceId>)> {
    let mut controller = SyncController::new();
    let mut ids = Vec::with_capacity(paths.len());
    for path in paths {
        let capture = capture::load_capture(path).map_err(io::Error::other)?;
        tracing::info!(path = %path.display(), exchanges = capture.exchanges.len(), "capture loaded");
        ids.push(controller.add_sequence(capture.name, capture.exchanges));
    }
    Ok((controller, ids))
}

/// Shows the `first` / `second` sequences (1-based) on the two sides. Defaults
/// to the first two captures.
fn activate_initial(
    controller: &mut SyncController,
    ids: &[SequenceId],
    first: Option<usize>,
    second: Option<usize>,
) -> io::Result<()> {
    let picks = [(Side::Left, first.unwrap_or(1)), (Side::Right, second.unwrap_or(2))];
    for (side, number) in picks {
        let explicit = match side {
            Side::Left => first.is_some(),
            Side::Right => second.is_some(),
        };
        let Some(&id) = number.checked_sub(1).and_then(|i| ids.get(i)) else {
            if explicit {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("no sequence {number}; {} captures loaded", ids.len()),
                ));
            }
            continue;
        };
        controller.set_active_sequence(side, id).map_err(io::Error::other)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // Step 1: arguments, config and logging. Nothing here touches the terminal.
    let cli = Cli::parse();
    let config = load_config(&cli);
    init_logging(config.log_file.as_deref());
    let theme = theme::Theme::from_name(&config.theme);

    // Step 2: sequences and the initial comparison.
    let (mut controller, ids) = load_sequences(&cli.captures)?;
    controller.set_selection_sync(config.selection_sync);
    controller.set_scroll_sync(config.scroll_sync);
    controller.set_display_mode(if cli.response {
        seqcmp_core::DisplayMode::Response
    } else {
        config.display_mode
    });
    activate_initial(&mut controller, &ids, cli.first, cli.second)?;

    // Step 3: event channel and diff worker. The worker holds a sender clone; it
    // exits once `state` (and its request sender) is dropped.
    let handler = event::EventHandler::new();
    let (diff_tx, diff_rx) = crossbeam_channel::unbounded();
    let worker_events = handler.tx.clone();
    std::thread::Builder::new()
        .name("diff-worker".to_owned())
        .spawn(move || worker::diff_worker_loop(diff_rx, worker_events))?;

    let mut state = app::AppState::new(controller, Some(diff_tx));

    // Step 4: panic hook first so it is the innermost hook, then SIGTERM.
    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;

    // Step 5: alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 6: terminal input and render requests.
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    // Exits only via `break` so `restore_tui()` below is always reached.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50ms even when idle.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            tracing::error!(error = %e, "draw failed");
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        keybindings::handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::DiffResult(payload)) => {
                        state.apply_diff_result(*payload);
                    }
                    // ratatui picks up the new size from frame.area() on the next Render.
                    Some(event::AppEvent::Resize(_, _)) => {}
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    tracing::info!("seqcmp exited");
    Ok(())
}
