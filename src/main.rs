use chrono::Utc;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use lakeside::config::{parse_args, usage, Command, GameConfig};
use lakeside::core::{
    GameSession, GameState, INPUT_POLL_MS, LOG_FILE_NAME, LOG_FILTER_ENV, TICK_INTERVAL_MS,
};
use lakeside::input::{walk_for, Key};
use lakeside::persistence::{
    load_profile, wipe_profile, BackgroundWriter, ConfiguredIdentity, FileBackend,
    IdentityProvider, OfflineIdentity, OfflineSink, PersistenceSink, Stores,
};
use lakeside::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// How long a walk key counts as held after its last press when the
/// terminal does not report key releases.
const WALK_HOLD_MS: u64 = 180;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args, |key| std::env::var(key).ok()) {
        Ok(Command::Play(config)) => config,
        Ok(Command::Version) => {
            println!("lakeside {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Ok(Command::Help) => {
            println!("{}", usage());
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'lakeside --help' for usage.");
            std::process::exit(2);
        }
    };

    let mut backend = FileBackend::new(&config.data_dir)?;
    init_tracing(backend.dir())?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %backend.dir().display(),
        "lakeside starting"
    );

    if config.reset {
        match wipe_profile(&mut backend) {
            Ok(()) => info!("saved progress deleted"),
            Err(e) => warn!(error = %e, "could not delete saved progress"),
        }
    }

    let session = build_session(&config, backend)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let reports_release = supports_keyboard_enhancement().unwrap_or(false)
        && stdout
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, session, reports_release);

    if reports_release {
        let _ = terminal.backend_mut().execute(PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "game loop ended with an error");
    }
    result
}

/// Logs go to a file in the data directory; the terminal belongs to the UI.
fn init_tracing(dir: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .init();
    Ok(())
}

/// Resolves identity, loads the profile, and picks where writes go.
fn build_session(config: &GameConfig, backend: FileBackend) -> io::Result<GameSession> {
    let identity: Box<dyn IdentityProvider> = if config.offline {
        Box::new(OfflineIdentity)
    } else {
        Box::new(ConfiguredIdentity::new(config.owner.clone()))
    };

    let mut stores = Stores::on_backend(backend);
    let profile = load_profile(identity.as_ref(), &mut stores);

    let sink: Box<dyn PersistenceSink> = match &profile.owner {
        Some(owner) => Box::new(BackgroundWriter::spawn(stores, owner.clone())?),
        None => Box::new(OfflineSink),
    };

    let state = GameState::from_profile(profile, config.weather_interval);
    Ok(GameSession::new(state, sink))
}

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Feeds crossterm key events into the session's input aggregator.
///
/// Without release reporting every key is released synthetically: action
/// keys right after the press, walk keys once their hold window lapses.
struct KeyFeed {
    reports_release: bool,
    walk_deadlines: HashMap<Key, Instant>,
}

impl KeyFeed {
    fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            walk_deadlines: HashMap::new(),
        }
    }

    fn handle(&mut self, session: &mut GameSession, event: KeyEvent) {
        let Some(key) = key_for(event.code) else {
            return;
        };
        let input = session.input_mut();

        if self.reports_release {
            match event.kind {
                KeyEventKind::Press => input.key_down(key),
                KeyEventKind::Release => input.key_up(key),
                KeyEventKind::Repeat => {}
            }
            return;
        }

        if event.kind != KeyEventKind::Press {
            return;
        }
        input.key_down(key);
        if walk_for(key).is_some() {
            let deadline = Instant::now() + Duration::from_millis(WALK_HOLD_MS);
            self.walk_deadlines.insert(key.normalized(), deadline);
        } else {
            input.key_up(key);
        }
    }

    fn release_expired(&mut self, session: &mut GameSession) {
        let now = Instant::now();
        let input = session.input_mut();
        self.walk_deadlines.retain(|key, deadline| {
            let live = *deadline > now;
            if !live {
                input.key_up(*key);
            }
            live
        });
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut session: GameSession,
    reports_release: bool,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut keys = KeyFeed::new(reports_release);
    let tick_interval = Duration::from_millis(TICK_INTERVAL_MS);
    let mut last_tick = Instant::now();
    let mut frame_count: u64 = 0;

    loop {
        terminal.draw(|frame| ui::draw(frame, session.state(), frame_count))?;

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) && key.kind == KeyEventKind::Press => break,
                Event::Key(key) => keys.handle(&mut session, key),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let area = terminal.size()?;
                    if let Some(action) =
                        ui::layout::hotspot_at(area, session.state(), mouse.column, mouse.row)
                    {
                        session.apply_action(action, &mut rng, Utc::now().timestamp_millis());
                    }
                }
                Event::FocusLost => session.input_mut().reset(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_interval {
            last_tick = Instant::now();
            frame_count = frame_count.wrapping_add(1);
            keys.release_expired(&mut session);
            session.tick(elapsed, &mut rng, Utc::now().timestamp_millis());
            session.poll_persistence();
        }
    }

    info!(
        fish_caught = session.state().player.total_fish_caught,
        "session ended"
    );
    // Dropping the session flushes queued writes
    drop(session);
    Ok(())
}
