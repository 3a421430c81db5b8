// ABOUTME: Main entry point for visionhub with TUI and CLI support
//
// Binary: visionhub
// Usage: visionhub [COMMAND]
// - No command: launches the membership form TUI
// - check: validate a saved form-data file
// - steps: list wizard steps and fields
// - config: print the effective configuration

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    path::Path,
    time::{Duration, Instant},
};

use visionhub::app::{App, AppEvent, EventHandler};
use visionhub::cli::{self, Commands, TuiArgs};
use visionhub::components::LayoutComponent;
use visionhub::config::AppConfig;
use visionhub::form::MembershipApplication;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();
    let config = AppConfig::load_with_override(args.config.as_deref())?;

    let result = match args.command {
        Some(Commands::Check(check_args)) => match cli::check::execute(&check_args, args.format) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        Some(Commands::Steps) => cli::steps::execute(args.format),
        Some(Commands::Config) => cli::config::execute(&config, args.format),

        // TUI mode (explicit or default)
        Some(Commands::Tui(tui_args)) => run_form(config, &tui_args).await,
        None => run_form(config, &TuiArgs::default()).await,
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_form(config: AppConfig, args: &TuiArgs) -> Result<()> {
    let mut app = App::new(config);
    let mut layout = LayoutComponent::new();

    // Flush any pending terminal events so stray keypresses don't land in the first field
    while crossterm::event::poll(Duration::from_millis(10)).unwrap_or(false) {
        let _ = crossterm::event::read();
    }

    run_tui(&mut app, &mut layout).await?;

    // The terminal is restored by now, so stdout is safe to use
    if let Some(application) = &app.state.submitted {
        write_application(application, args.output.as_deref())?;
    }

    Ok(())
}

fn write_application(application: &MembershipApplication, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(application)
        .context("Failed to serialize membership application")?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write application to {}", path.display()))?;
            tracing::info!("Application {} written to {}", application.id, path.display());
            eprintln!("Application saved to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try `visionhub check <file>` to validate form data without one."
        ));
    }

    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if let Ok(size) = terminal.size() {
        app.state.handle_resize(size.width);
    }

    // Ensure terminal cleanup happens even if there's an error
    let result = run_tui_loop(app, layout, &mut terminal).await;

    // Always clean up terminal using unified cleanup
    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        // Fallback to basic cleanup
        cleanup_terminal();
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(app.state.config.ui.tick_rate_ms.max(10));
    let mut last_tick = Instant::now();

    // Startup guard: ignore key events for the first 100ms so buffered
    // keypresses from the shell don't end up in the form
    let startup_time = Instant::now();
    const STARTUP_GUARD_MS: u64 = 100;

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &mut app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            let app_event = match event::read()? {
                Event::Key(key_event) => {
                    if startup_time.elapsed() < Duration::from_millis(STARTUP_GUARD_MS) {
                        tracing::debug!(
                            "Ignoring key event {:?} during startup guard period",
                            key_event.code
                        );
                        continue;
                    }
                    // Windows reports releases too
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    EventHandler::handle_key_event(key_event, &mut app.state)
                }
                Event::Mouse(mouse_event) => EventHandler::handle_mouse_event(mouse_event),
                Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
                Event::Paste(text) => Some(AppEvent::Paste(text)),
                Event::FocusGained | Event::FocusLost => None,
            };

            if let Some(app_event) = app_event {
                EventHandler::process_event(app_event, &mut app.state);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if let Err(e) = app.tick().await {
                tracing::error!("Error during app tick: {}", e);
            }
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    // Create log directory if it doesn't exist
    let log_dir = dirs::home_dir()
        .map(|home| home.join(".visionhub").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".visionhub/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "visionhub-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // The TUI owns the terminal, so logs only ever go to the file
    let file = match OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled: cannot open {}: {}", log_file.display(), e);
            return;
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visionhub=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
