mod app;
mod theme;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use app::{App, InputMode};
use coinsift::config::BASE_URL_ENV;
use coinsift::{logging, Config, HttpCoinRepository, ListEngine, LoadResult};

#[derive(Debug, Parser)]
#[command(name = "coinsift", version, about = "Browse a coin list with search and filters")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Coin list URL, overrides config and environment
    #[arg(long)]
    base_url: Option<String>,

    /// Log filter, e.g. "debug" or "coinsift=trace"
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.resolve_base_url(std::env::var(BASE_URL_ENV).ok(), cli.base_url);
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    logging::init(&config.log_level);
    info!(base_url = ?config.api_base_url, "starting");
    if !theme::THEME_NAMES.contains(&config.theme.as_str()) {
        warn!(theme = %config.theme, "unknown theme, using dark");
    }

    let repository = HttpCoinRepository::new(config.api_base_url.clone(), config.request_timeout())?;
    let engine = ListEngine::new(Arc::new(repository))
        .with_reapply_on_load(config.reapply_filters_on_load);
    let mut app = App::new(engine, theme::by_name(&config.theme));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!("Fatal: {:#}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let (load_tx, mut load_rx): (UnboundedSender<LoadResult>, UnboundedReceiver<LoadResult>) =
        mpsc::unbounded_channel();

    app.start_load(&load_tx);

    loop {
        while let Ok(result) = load_rx.try_recv() {
            app.finish_load(result);
        }
        app.pump_events();
        app.update_refresh_display();

        terminal.draw(|f| ui::draw(f, &mut *app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    app.quit = true;
                }

                match app.input_mode {
                    InputMode::Searching => match key.code {
                        KeyCode::Esc | KeyCode::Enter => {
                            app.input_mode = InputMode::Normal;
                        }
                        KeyCode::Backspace => app.pop_query_char(),
                        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.push_query_char(c);
                        }
                        _ => {}
                    },
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
                        KeyCode::Char('/') => app.input_mode = InputMode::Searching,
                        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
                        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
                        KeyCode::Char('g') => {
                            app.selected = 0;
                            app.adjust_scroll();
                        }
                        KeyCode::Char('G') => {
                            let len = app.visible_coins().len();
                            if len > 0 {
                                app.selected = len - 1;
                            }
                            app.adjust_scroll();
                        }
                        KeyCode::Char(c @ '1'..='5') => {
                            let index = c as usize - '1' as usize;
                            app.toggle_chip(index);
                        }
                        KeyCode::Char('h') | KeyCode::Left => app.move_chip_cursor(false),
                        KeyCode::Char('l') | KeyCode::Right => app.move_chip_cursor(true),
                        KeyCode::Char(' ') => app.toggle_chip_at_cursor(),
                        KeyCode::Char('x') => app.clear_filters(),
                        KeyCode::Char('r') => app.start_load(&load_tx),
                        _ => {}
                    },
                }
            }
        }

        if app.quit {
            break;
        }
    }

    Ok(())
}
