use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use labguard::{
    app::App,
    app_dirs::AppDirs,
    catalog::Catalog,
    config::{Config, ConfigStore, FileConfigStore},
    feed::clamp_probability,
    logging,
    route::Route,
    runtime::{AppEvent, AppEventSource, ChannelEventSource, Runner},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::{info, Level};

/// exam proctoring in the terminal: timed exams, exam drafting and a live monitoring feed
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal exam-proctoring demo: take timed multiple-choice exams, draft new ones, and watch a simulated zone-detection feed."
)]
pub struct Cli {
    /// route to open at startup, e.g. /instructor or /exam/1
    #[clap(short = 'r', long, default_value = "/")]
    route: String,

    /// exam countdown in seconds (default 3600)
    #[clap(short = 'd', long)]
    duration: Option<u64>,

    /// seconds between detection draws on the monitor
    #[clap(long)]
    emit_every: Option<u64>,

    /// chance that a detection draw produces an event, 0.0 to 1.0
    #[clap(long, value_parser = parse_probability)]
    emit_probability: Option<f64>,

    /// seed the detection generator for reproducible feeds
    #[clap(long)]
    seed: Option<u64>,

    /// read settings from this file instead of the user config dir
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// log verbosity for the log file
    #[clap(long, default_value_t = Level::INFO)]
    log_level: Level,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Layer command line flags over the loaded settings
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(secs) = self.duration {
            config.exam_duration_secs = secs.max(1);
        }
        if let Some(secs) = self.emit_every {
            config.feed.emission_period_secs = secs.max(1);
        }
        if let Some(p) = self.emit_probability.and_then(clamp_probability) {
            config.feed.emission_probability = p;
        }
    }
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if p.is_finite() {
        Ok(p)
    } else {
        Err(format!("{s} is not a finite number"))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        logging::init_file_logging(&path, cli.log_level)?;
    }

    let store = cli.config_store();
    let mut config = store.load();
    cli.apply_overrides(&mut config);
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    let catalog = Catalog::embedded()?;
    let mut app = App::new(config, catalog, Route::parse(&cli.route), cli.seed);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(ChannelEventSource::terminal(), app.config.tick_rate());

    let result = start_tui(&mut terminal, &mut app, runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: AppEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut runner: Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        let (event, elapsed) = runner.step();
        app.on_tick(elapsed);

        match event {
            AppEvent::Key(key) => app.on_key(key),
            AppEvent::Resize | AppEvent::Tick => {}
        }

        if app.should_quit() {
            break;
        }
        terminal.draw(|f| ui(app, f))?;
    }

    app.shutdown();
    info!("shutting down");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
