use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use gallows::{
    config::{Config, ConfigStore, FileConfigStore, RuntimeSettings},
    input::action_for_key,
    logging::{default_log_path, init_file_logging},
    runtime::{CrosstermEventSource, GameEvent, Runner},
    words::{builtin_words, load_word_file, SecretWord, BUILTIN_LIST},
    App, ConfigError, Control, WordBank,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, warn};

const POLL_INTERVAL_MS: u64 = 250;

/// hangman in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the secret word one letter at a time. Seven wrong letters and the figure is complete."
)]
pub struct Cli {
    /// line-delimited word list to draw secret words from (default: built-in list)
    #[clap(short = 'w', long = "words")]
    words_file: Option<PathBuf>,

    /// stop once every word has been played instead of starting over with the full list
    #[clap(long)]
    no_refill: bool,

    /// seed for word selection, for reproducible sessions
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// write the effective settings to the config file before starting
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Apply command line overrides on top of the stored config
    fn settings(&self, cfg: &Config) -> RuntimeSettings {
        let mut settings = RuntimeSettings::from(cfg);
        if let Some(path) = &self.words_file {
            settings.words_file = Some(path.clone());
        }
        if self.no_refill {
            settings.refill_when_empty = false;
        }
        settings.seed = self.seed;
        settings
    }
}

/// A broken config file falls back to the defaults; the error is handed back
/// so it can be reported once logging is up
fn load_config<S: ConfigStore>(store: &S) -> (Config, Option<ConfigError>) {
    match store.load() {
        Ok(cfg) => (cfg, None),
        Err(err) => (Config::default(), Some(err)),
    }
}

fn load_words(settings: &RuntimeSettings) -> Result<Vec<SecretWord>, Box<dyn Error>> {
    let words = match &settings.words_file {
        Some(path) => load_word_file(path)?,
        None => builtin_words(BUILTIN_LIST)?,
    };
    Ok(words)
}

fn build_app(settings: &RuntimeSettings) -> Result<App, Box<dyn Error>> {
    let words = load_words(settings)?;
    let bank = match settings.seed {
        Some(seed) => WordBank::with_seed(words, seed)?,
        None => WordBank::from_entropy(words)?,
    };
    Ok(App::new(bank, settings.refill_when_empty)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let (config, config_err) = load_config(&store);
    let settings = cli.settings(&config);
    if cli.save_config {
        store.save(&Config::from(&settings))?;
    }

    if let Some(log_path) = default_log_path() {
        if let Err(err) = init_file_logging(&log_path, &settings.log_filter) {
            eprintln!("warning: logging disabled ({err})");
        }
    }
    if let Some(err) = &config_err {
        warn!(%err, "using default settings");
        eprintln!("warning: {err}, using default settings");
    }
    info!(?settings, "starting");

    let mut app = build_app(&settings)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(POLL_INTERVAL_MS),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Key(key) => {
                let Some(action) = action_for_key(key) else {
                    continue;
                };
                if app.handle(action) == Control::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Tick => {}
            GameEvent::Closed => break,
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
