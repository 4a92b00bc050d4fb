use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use sensordeck::events::{handle_key_event, poll_event};
use sensordeck::ui::dashboard;
use sensordeck::{App, JsonLinesUploader, Logo, Settings, SimulatedSource, Uploader};

#[derive(Parser, Debug)]
#[command(name = "sensordeck")]
#[command(about = "Terminal dashboard for simulated sensor readings")]
#[command(version)]
struct Args {
    /// Path to a TOML settings file (built-in demo settings if omitted)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Stop after this many uploads (0 = run until interrupted)
    #[arg(short, long)]
    uploads: Option<u64>,

    /// Seconds between samples, overriding the settings file
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Append uploaded readings to this file as JSON lines
    #[arg(long)]
    upload_log: Option<PathBuf>,

    /// Append tracing output to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Run the sampling loop without a terminal UI
    #[arg(long)]
    no_ui: bool,

    /// Seed the simulated sensor for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::demo(),
    };
    if let Some(uploads) = args.uploads {
        settings.max_uploads = uploads;
    }
    if let Some(secs) = args.refresh {
        settings.tick_interval = Duration::from_secs(secs.max(1));
    }

    let mut source = match args.seed {
        Some(seed) => SimulatedSource::with_seed(seed),
        None => SimulatedSource::new(),
    };
    for metric in &settings.metrics {
        // Full-range walk so the dashboard shows every zone color
        source.register_range(&metric.id, &metric.range);
    }

    let uploader: Box<dyn Uploader> = match &args.upload_log {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open upload log {}", path.display()))?;
            Box::new(JsonLinesUploader::new(file, &path.display().to_string()))
        }
        None => Box::new(JsonLinesUploader::new(io::sink(), "discard")),
    };

    let mut app = App::new(&settings, Box::new(source), uploader);
    info!(
        source = app.source_description(),
        uploader = app.uploader_description(),
        "starting"
    );

    if args.no_ui {
        run_headless(&mut app)
    } else {
        run_tui(&mut app)
    }?;

    print_summary(&app);
    Ok(())
}

/// Route tracing output so it never corrupts the alternate screen: a file
/// when requested, stderr in headless mode, discarded otherwise.
fn init_tracing(args: &Args) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_max_level(tracing::Level::INFO);
    match &args.log {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if args.no_ui => {
            builder.with_writer(io::stderr).init();
        }
        None => {
            builder.with_writer(io::sink).init();
        }
    }
    Ok(())
}

/// Run the sampling loop without a terminal, for logging or piping.
/// Stops when the upload limit is reached.
fn run_headless(app: &mut App) -> Result<()> {
    app.start();
    while !app.is_stopped() {
        app.tick();
        for (id, value) in app.latest_values() {
            match value {
                Some(v) => info!(metric = id, value = v, "sampled"),
                None => info!(metric = id, "no sample"),
            }
        }
        if !app.is_stopped() {
            std::thread::sleep(app.tick_interval());
        }
    }
    Ok(())
}

/// Run the interactive dashboard until the upload limit is reached or the
/// user quits.
fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal even if rendering panics
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let logo = Logo::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        terminal.size().map(|s| s.width as usize).unwrap_or(80),
    );

    app.start();
    app.tick();
    let mut last_tick = Instant::now();

    while !app.is_stopped() {
        terminal.draw(|frame| dashboard::render(frame, app, &logo))?;

        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? {
            handle_key_event(app, key);
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= app.tick_interval() {
            app.tick();
            last_tick = Instant::now();
        } else {
            app.update_wait(elapsed);
        }
    }

    // Leave the final state on screen for one frame before tearing down
    terminal.draw(|frame| dashboard::render(frame, app, &logo))?;
    Ok(())
}

fn print_summary(app: &App) {
    println!(
        "{} session: {} to {}, {} of {} uploads",
        env!("CARGO_PKG_NAME"),
        app.started_at().format("%Y-%m-%d %H:%M:%S"),
        chrono::Local::now().format("%H:%M:%S"),
        app.num_uploads(),
        if app.max_uploads() == 0 {
            "unlimited".to_string()
        } else {
            app.max_uploads().to_string()
        }
    );
}
