use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use namesake::{
    app::PreviewApp,
    config::AppConfig,
    locale::LocaleTag,
    poll::{PollError, Poller},
    relative::{format_relative, parse_instant},
    text::{self, Readability},
    theme::{self, Theme},
    ui,
};

#[derive(Parser, Debug)]
#[command(name = "namesake")]
#[command(version)]
#[command(about = "Locale-aware text and time utilities for the Namesake name-change guide")]
struct Args {
    /// Locale tag (e.g. en-US, fr, tr); defaults to config, then environment
    #[arg(short, long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe a timestamp relative to now ("2 hours ago")
    Ago {
        /// RFC 3339 timestamp or epoch milliseconds
        timestamp: String,

        /// Reference time instead of the system clock
        #[arg(long)]
        now: Option<String>,
    },

    /// Uppercase the first cased character of the text
    Capitalize {
        text: String,
    },

    /// Grade a passage read from a file or stdin
    Readability {
        /// Read from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Minimum length in characters before grading
        #[arg(long)]
        min_length: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Wait until a path exists
    WaitFor {
        path: PathBuf,

        /// Delay between checks in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Give up after this many checks
        #[arg(long)]
        max_attempts: Option<u64>,
    },

    /// Interactive preview of capitalization, readability and edit time
    Preview,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; the preview owns the terminal, so only log there on request
    let log_to_stderr = !matches!(args.command, Command::Preview) || std::env::var_os("RUST_LOG").is_some();
    if log_to_stderr {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let config = AppConfig::load()?;
    let locale = LocaleTag::resolve(args.locale.as_deref(), config.locale.as_deref());
    tracing::debug!("Using locale {}", locale);

    match args.command {
        Command::Ago { timestamp, now } => print_ago(&timestamp, now.as_deref(), &locale),
        Command::Capitalize { text } => {
            println!("{}", text::capitalize_in(&text, &locale));
            Ok(())
        }
        Command::Readability { file, min_length, json } => {
            let min_length = min_length.unwrap_or(config.readability_min_length);
            print_readability(file, min_length, json, &Theme::from_config(&config.theme))
        }
        Command::WaitFor { path, interval_ms, timeout_ms, max_attempts } => {
            let mut poller = Poller::new().interval(
                interval_ms.map(Duration::from_millis).unwrap_or_else(|| config.poll_interval()),
            );
            if let Some(ms) = timeout_ms {
                poller = poller.timeout(Duration::from_millis(ms));
            }
            if let Some(n) = max_attempts {
                poller = poller.max_attempts(n);
            }
            wait_for_path(path, poller).await
        }
        Command::Preview => run_preview(locale, &config).await,
    }
}

fn print_ago(timestamp: &str, now: Option<&str>, locale: &LocaleTag) -> Result<()> {
    let target = parse_instant(timestamp)?;
    let now = match now {
        Some(raw) => parse_instant(raw).context("Invalid --now")?,
        None => Utc::now(),
    };

    println!("{}", format_relative(target, now, locale));
    Ok(())
}

fn print_readability(file: Option<PathBuf>, min_length: usize, json: bool, theme: &Theme) -> Result<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            buf
        }
    };

    let result = text::assess(Some(&input), min_length);

    if json {
        let output = serde_json::json!({
            "chars": input.chars().count(),
            "min_length": min_length,
            "graded": result.is_some(),
            "score": result.map(|r| r.score),
            "label": result.map(|r| r.label.as_str()),
            "bucket": result.map(|r| r.bucket),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    match result {
        Some(readability) => print_badge(&readability, theme)?,
        None => println!(
            "Not graded ({} of {} characters)",
            input.chars().count(),
            min_length
        ),
    }
    Ok(())
}

fn print_badge(readability: &Readability, theme: &Theme) -> Result<()> {
    let color = theme::to_crossterm(theme.bucket_color(readability.bucket));
    let mut stdout = io::stdout();
    execute!(
        stdout,
        SetForegroundColor(color),
        Print(format!("● {}", readability.label)),
        ResetColor,
        Print(format!(" (score {:.1})\n", readability.score)),
    )?;
    Ok(())
}

async fn wait_for_path(path: PathBuf, poller: Poller) -> Result<()> {
    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    tracing::info!("Waiting for {}", path.display());
    match poller.cancel_on(token).wait(|| path.exists()).await {
        Ok(attempts) => {
            tracing::info!("{} appeared after {} checks", path.display(), attempts);
            Ok(())
        }
        Err(e @ PollError::Cancelled { .. }) => {
            tracing::info!("{}", e);
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Gave up waiting for {}", path.display())),
    }
}

async fn run_preview(locale: LocaleTag, config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::from_config(&config.theme);
    let mut app = PreviewApp::new(locale, config.readability_min_length);

    let result = run_app(&mut terminal, &mut app, &theme);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut PreviewApp,
    theme: &Theme,
) -> Result<()> {
    loop {
        let now = Utc::now();
        terminal.draw(|f| ui::draw(f, app, theme, now))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Utc::now());
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        // Periodic refresh
        app.tick();
    }
}
