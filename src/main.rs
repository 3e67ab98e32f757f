#![warn(clippy::all, clippy::pedantic)]

use std::fs::OpenOptions;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use blockdrop::app::App;
use blockdrop::config::{self, Config};
use blockdrop::input;
use blockdrop::ui;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> Result<()> {
    let (config, config_error) = match config::loader::load_config_from_file() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config)?;
    info!("Starting Blockdrop");
    match config_error {
        Some(e) => error!("Failed to load configuration, using defaults: {e}"),
        None => info!("Configuration loaded successfully"),
    }

    // Terminal initialization
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let app = App::from_config(&config);
    let res = run_app(&mut terminal, app, config.display.frame_interval());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }
    res
}

// Logs go to a file so they never draw over the terminal UI
fn init_logging(config: &Config) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log.file)
        .with_context(|| format!("failed to create log file {}", config.log.file))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log.filter.as_str()),
    )
    .format_timestamp(None)
    .format_module_path(false)
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    frame_rate: Duration,
) -> Result<()> {
    let mut last_frame = Instant::now();

    // Drop anything typed before the game came up
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if last_frame.elapsed() >= frame_rate {
            app.on_frame();
            let snapshot = app.snapshot();
            terminal.draw(|f| ui::render(f, &snapshot, app.show_ghost))?;
            last_frame = Instant::now();
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }

        let timeout = frame_rate.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                debug!("Key event: {key:?}");

                if input::should_quit(key) {
                    app.should_quit = true;
                    continue;
                }

                if let Some(command) = input::command_for_key(key) {
                    app.handle_command(command);
                }
            }
        }
    }
}
