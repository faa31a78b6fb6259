mod app;
mod config;
mod error;
mod events;
mod feed;
mod lifecycle;
mod log;
mod picker;
mod records;
mod selector;
mod services;
mod source;
mod tui;

use std::collections::HashMap;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableBracketedPaste, DisableBracketedPaste, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

use app::App;
use config::Config;
use events::EventHandler;
use feed::FetchResponse;
use services::FetchDispatcher;
use source::{Catalog, EntityKind, ListDataSource};

/// Options given on the command line
#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    data_file: Option<PathBuf>,
    page_size: Option<usize>,
    latency_ms: Option<u64>,
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--config", Some(path)) => cli.config_path = Some(PathBuf::from(path)),
            ("--data" | "-d", Some(path)) => cli.data_file = Some(PathBuf::from(path)),
            ("--page-size", Some(n)) => match n.parse() {
                Ok(n) => cli.page_size = Some(n),
                Err(_) => eprintln!("Warning: invalid --page-size '{}', ignoring", n),
            },
            ("--latency-ms", Some(n)) => match n.parse() {
                Ok(n) => cli.latency_ms = Some(n),
                Err(_) => eprintln!("Warning: invalid --latency-ms '{}', ignoring", n),
            },
            (flag @ ("--config" | "--data" | "-d" | "--page-size" | "--latency-ms"), None) => {
                eprintln!("Warning: {} requires an argument", flag);
                i += 1;
                continue;
            }
            _ => {
                // Unknown flag, ignore
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    cli
}

/// Catalog from the configured file, or the built-in seed.
fn load_catalog(config: &Config) -> error::Result<Catalog> {
    let catalog = match config.data_file() {
        Some(path) => Catalog::load(&path)?,
        None => Catalog::seed()?,
    };
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
    }
    log::install_panic_hook();

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    // Precedence: CLI > env var > config file > defaults
    let config = match &cli.config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .with_overrides(cli.data_file, cli.page_size, cli.latency_ms);

    let catalog = load_catalog(&config).context("loading catalog")?;
    log::log(&format!(
        "Catalog: {} records, page size {}, latency {:?}",
        catalog.records().len(),
        config.page_size(),
        config.latency()
    ));

    let sources: HashMap<EntityKind, Arc<dyn ListDataSource>> = [EntityKind::Agent, EntityKind::City, EntityKind::Client]
        .into_iter()
        .map(|kind| (kind, catalog.source(kind, config.latency(), &config.failing_pages)))
        .collect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog.records().to_vec(), config);

    // Run the app
    let result = run_app(&mut terminal, &mut app, sources).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::log("=== brokerdesk exiting ===");
    result
}

/// Spinner, toast and debounce clock, on a fixed schedule independent of
/// terminal events.
fn ui_ticker() -> Interval {
    let mut ticker = tokio::time::interval(Duration::from_millis(80));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    sources: HashMap<EntityKind, Arc<dyn ListDataSource>>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Channel for fetch results coming back from spawned tasks
    let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchResponse>(32);
    let dispatcher = FetchDispatcher::new(sources, fetch_tx);

    // Event stream for keyboard and mouse
    let mut event_stream = EventStream::new();
    let mut ticker = ui_ticker();

    loop {
        // Render
        terminal.draw(|frame| tui::ui::render(frame, app))?;

        // Handle events with timeout for responsiveness
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        for action in EventHandler::handle_event(app, &event) {
                            if let Some(request) = app.apply(action, Instant::now()) {
                                dispatcher.dispatch(request);
                            }
                        }
                    }
                    Some(Err(e)) => log::log(&format!("Terminal event error: {}", e)),
                    None => break,
                }
            }

            Some(response) = fetch_rx.recv() => {
                if let Some(request) = app.on_fetch_response(response, Instant::now()) {
                    dispatcher.dispatch(request);
                }
            }

            // Tick spinner, expire toasts and fire debounced searches
            _ = ticker.tick() => {
                if let Some(request) = app.tick(Instant::now()) {
                    dispatcher.dispatch(request);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("brokerdesk")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = parse_args(&args(&[
            "--config", "/etc/bd.toml", "--data", "cat.json", "--page-size", "5", "--latency-ms", "200",
        ]));
        assert_eq!(cli.config_path, Some(PathBuf::from("/etc/bd.toml")));
        assert_eq!(cli.data_file, Some(PathBuf::from("cat.json")));
        assert_eq!(cli.page_size, Some(5));
        assert_eq!(cli.latency_ms, Some(200));
    }

    #[tokio::test]
    async fn test_ticker_keeps_firing_under_constant_input() {
        let mut ticker = ui_ticker();
        // First tick completes immediately
        ticker.tick().await;

        let started = Instant::now();
        let mut ticks = 0;
        while started.elapsed() < Duration::from_millis(500) {
            tokio::select! {
                // Stand-in for mouse motion arriving every few milliseconds
                _ = tokio::time::sleep(Duration::from_millis(5)) => {}
                _ = ticker.tick() => ticks += 1,
            }
        }
        assert!(ticks >= 2, "ticker starved: {} ticks", ticks);
    }

    #[test]
    fn test_bad_values_and_unknown_flags_are_ignored() {
        let cli = parse_args(&args(&["--verbose", "--page-size", "many", "--latency-ms"]));
        assert!(cli.page_size.is_none());
        assert!(cli.latency_ms.is_none());
        assert!(cli.data_file.is_none());
    }
}
