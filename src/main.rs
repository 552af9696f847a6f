use boggle::{
    clock::{TickOutcome, TICK_INTERVAL},
    config::{ConfigStore, FileConfigStore},
    game::{GameSession, Phase, SessionConfig},
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    solutions::SolutionIndex,
    ui::GameScreen,
    view::GameView,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    fs::File,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// find words on a letter grid before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Solitaire word finding: start a game, type every word you can spot on the grid, and see the ones you missed when time runs out."
)]
pub struct Cli {
    /// side length of the board to play
    #[clap(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..))]
    size: Option<u16>,

    /// number of seconds per game
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    seconds: Option<u32>,

    /// file that receives the log output
    #[clap(long, default_value = "boggle.log")]
    log_file: PathBuf,
}

/// What the event loop has to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    Started,
    Stopped,
}

#[derive(Debug)]
pub struct App {
    pub session: GameSession,
    pub input: String,
}

impl App {
    pub fn new(index: Arc<SolutionIndex>, config: SessionConfig) -> Self {
        Self {
            session: GameSession::new(index, config),
            input: String::new(),
        }
    }

    pub fn view(&self) -> GameView {
        GameView::project(&self.session)
    }

    fn start(&mut self) {
        self.input.clear();
        self.session.start();
    }

    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.session.on_tick();
        if outcome == TickOutcome::Expired {
            self.input.clear();
        }
        outcome
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Option<Control> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Some(Control::Quit);
        }

        if self.session.is_running() {
            match key.code {
                KeyCode::Esc => {
                    self.session.stop();
                    self.input.clear();
                    Some(Control::Stopped)
                }
                KeyCode::Char('r') if ctrl => {
                    self.start();
                    Some(Control::Started)
                }
                KeyCode::Enter => {
                    let word = std::mem::take(&mut self.input);
                    self.session.submit_word(&word);
                    None
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    None
                }
                KeyCode::Char(c) if !ctrl => {
                    self.input.push(c);
                    None
                }
                _ => None,
            }
        } else if self.session.phase() == Phase::Idle {
            match key.code {
                KeyCode::Char('s') | KeyCode::Enter => {
                    self.start();
                    Some(Control::Started)
                }
                KeyCode::Char('q') | KeyCode::Esc => Some(Control::Quit),
                _ => None,
            }
        } else {
            // the reveal stays up until an explicit restart or ctrl+c
            match key.code {
                KeyCode::Char('r') if ctrl => {
                    self.start();
                    Some(Control::Started)
                }
                _ => None,
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging(&cli.log_file);

    let store = FileConfigStore::new();
    let config = store
        .load()
        .merged(cli.size.map(usize::from), cli.seconds);

    let index = SolutionIndex::embedded().inspect_err(|e| error!(error = %e, "cannot load boards"))?;
    info!(
        sizes = ?index.sizes().collect::<Vec<_>>(),
        config_path = %store.path().display(),
        board_size = config.board_size,
        duration_secs = config.duration_secs,
        "starting"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Arc::new(index), config);
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(TICK_INTERVAL),
    );
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }
    result
}

/// Send logs to `path`. Returns false and plays on without logging when the
/// file cannot be created.
fn init_logging(path: &Path) -> bool {
    // stdout belongs to the terminal UI
    let log_file = match File::create(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("boggle: logging disabled, cannot open {}: {e}", path.display());
            return false;
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    true
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        let Some(event) = runner.step() else {
            continue;
        };

        match event {
            GameEvent::Tick => {
                if app.on_tick() != TickOutcome::Ticked {
                    runner.disarm();
                }
            }
            GameEvent::Resize => {}
            GameEvent::Key(key) => match app.on_key(key) {
                Some(Control::Quit) => break,
                Some(Control::Started) => runner.arm(),
                Some(Control::Stopped) => runner.disarm(),
                None => {}
            },
        }

        terminal.draw(|f| ui(app, f))?;
    }

    info!("quit");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    let view = app.view();
    f.render_widget(GameScreen::new(&view, &app.input), f.area());
}
