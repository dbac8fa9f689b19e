//! filecrypt: interactive file encryption for the terminal
//!
//! Browse a directory tree, pick a file, confirm, type a password; the file
//! is encrypted to `<name>.enc` (or decrypted back) in place.

mod app;
mod filetype;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use filecrypt_core::config::FilecryptConfig;

use app::App;

#[derive(Parser, Debug)]
#[command(
    name = "filecrypt",
    version,
    about = "Encrypt and decrypt files with a password",
    long_about = "filecrypt: pick a file from an interactive browser and encrypt or decrypt it \
                  with a password-derived key"
)]
struct Cli {
    /// Show hidden files (entries starting with '.')
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Starting directory for the file browser; takes precedence over the
    /// positional argument
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Starting directory for the file browser
    #[arg(value_name = "DIRECTORY")]
    positional: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short = 'c', long, env = "FILECRYPT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Diagnostics go to a file or nowhere: the TUI owns the terminal.
fn init_logging(config: &FilecryptConfig) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let Some(path) = &config.log.file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = FilecryptConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config)?;

    let root = cli
        .directory
        .or(cli.positional)
        .or_else(|| config.browser.start_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let show_hidden = cli.all || config.browser.show_hidden;

    // Scan before touching the terminal so a bad path fails with a plain
    // error message instead of a corrupted screen.
    let mut app = App::new(root.clone(), show_hidden)
        .with_context(|| format!("building file tree for '{}'", root.display()))?;

    // Set up terminal
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    // Panic hook: restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        original_hook(info);
    }));

    // Main event loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(200)).context("event poll")? {
            if let Event::Key(key) = event::read().context("event read")? {
                if key.kind != KeyEventKind::Release {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode().context("disable raw mode")?;
    io::stdout()
        .execute(LeaveAlternateScreen)
        .context("leave alternate screen")?;

    Ok(())
}
