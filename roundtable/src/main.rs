//! Round Table knight gallery TUI application.
//!
//! Browse knights by category, read their Wikipedia summaries, and leave
//! comments on a mock data server.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented text interface suitable for scripting:
//!
//! ```bash
//! echo "category Legendary" | cargo run -p roundtable -- --headless
//! ```

mod app;
mod events;
mod headless;
mod ui;
mod worker;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use roundtable_core::{ClientConfig, DataClient};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use wiki::Wiki;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

/// Knight gallery client
#[derive(Debug, Parser)]
#[command(name = "roundtable", version, about)]
struct Args {
    /// Base URL of the knights/comments data server
    #[arg(long, value_name = "URL")]
    data_url: Option<String>,

    /// MediaWiki API endpoint
    #[arg(long, value_name = "URL")]
    wiki_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Run the line-oriented text interface instead of the TUI
    #[arg(long)]
    headless: bool,

    /// Log filter, e.g. `info` or `roundtable_core=debug`
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Environment configuration with command line overrides applied
    fn client_config(&self) -> Result<ClientConfig, Box<dyn std::error::Error>> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &self.data_url {
            config = config.with_data_url(url.clone());
        }
        if let Some(url) = &self.wiki_url {
            config = config.with_wiki_url(url.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.validate()?;
        Ok(config)
    }
}

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so without `--log-file` it logs nowhere.
/// Headless mode logs to stderr, leaving stdout for the protocol.
fn init_logging(args: &Args) -> io::Result<()> {
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(log_file) = &args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else if args.headless {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args)?;

    let config = match args.client_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    tracing::info!(data_url = %config.data_url, wiki_url = %config.wiki_url, "starting");

    if args.headless {
        return headless::run_headless(config).await.map_err(|e| e.into());
    }

    let data = Arc::new(DataClient::new(&config));
    let wiki = Arc::new(Wiki::with_timeout(config.timeout).with_base_url(config.wiki_url.clone()));
    let (request_tx, response_rx) = worker::spawn_worker(data, wiki);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(request_tx, response_rx)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    app.load();

    loop {
        terminal.draw(|f| render(f, &app))?;

        // Worker responses land between frames
        app.drain_responses();

        // Poll with a timeout so responses keep flowing while idle
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
