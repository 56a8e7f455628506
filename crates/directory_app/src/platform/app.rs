use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use directory_core::{update, DirectoryState, Effect, ExperienceLoad, Msg};
use directory_logging::{dir_debug, dir_info, dir_warn, DEFAULT_LOG_FILE};
use log::LevelFilter;

use super::effects::EffectRunner;
use super::render;
use super::settings::{load_settings, API_URL_ENV};
use crate::cli::{parse_command, CommandError, StartupArgs};

/// How long the loop waits for input before polling the engine again.
const TICK: Duration = Duration::from_millis(75);
/// Slack on top of the client timeouts before giving up on a completion.
const SETTLE_SLACK: Duration = Duration::from_secs(5);
const PROMPT: &str = "directory> ";

pub fn run_app(args: StartupArgs) -> anyhow::Result<()> {
    let settings = load_settings(&args.settings)?;

    let destination = args.log.map_or(settings.log_destination, Into::into);
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    directory_logging::initialize(destination, level, Path::new(DEFAULT_LOG_FILE));

    let env_url = env::var(API_URL_ENV).ok();
    let api_settings = settings.api_settings(args.base_url.as_deref(), env_url.as_deref());
    let settle_limit = api_settings.connect_timeout + api_settings.request_timeout + SETTLE_SLACK;
    let runner = EffectRunner::new(api_settings).context("could not start the directory engine")?;

    let mut app = App::new(
        DirectoryState::with_filters(args.initial_filters()),
        runner,
        settle_limit,
    );

    // Not held locked: terminal logging writes to stdout from engine threads.
    let mut out = io::stdout();
    writeln!(out, "Type `help` for commands.")?;
    app.start();
    app.render_if_dirty(&mut out)?;
    prompt(&mut out)?;

    let lines = spawn_input_reader();
    loop {
        let input = lines.recv_timeout(TICK);
        app.poll_engine();
        match input {
            Ok(line) => {
                if !app.handle_line(&line, &mut out)? {
                    break;
                }
                app.render_if_dirty(&mut out)?;
                prompt(&mut out)?;
            }
            Err(RecvTimeoutError::Timeout) => {
                if app.render_if_dirty(&mut out)? {
                    prompt(&mut out)?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                app.settle();
                app.render_if_dirty(&mut out)?;
                writeln!(out)?;
                break;
            }
        }
    }

    dir_info!("directory session ended");
    Ok(())
}

/// The first query of a session: the startup filters, or none at all.
fn startup(state: DirectoryState) -> (DirectoryState, Vec<Effect>) {
    update(state, Msg::Refresh)
}

/// True when no page or experiences fetch is awaiting its completion.
fn is_settled(state: &DirectoryState) -> bool {
    let detail_loading = state
        .detail()
        .is_some_and(|panel| *panel.experiences() == ExperienceLoad::Loading);
    state.pending_request().is_none() && !detail_loading
}

struct App {
    state: DirectoryState,
    runner: EffectRunner,
    settle_limit: Duration,
}

impl App {
    fn new(state: DirectoryState, runner: EffectRunner, settle_limit: Duration) -> Self {
        Self {
            state,
            runner,
            settle_limit,
        }
    }

    fn start(&mut self) {
        let (state, effects) = startup(std::mem::take(&mut self.state));
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn poll_engine(&mut self) {
        for msg in self.runner.drain() {
            self.dispatch(msg);
        }
    }

    /// Applies completions until nothing is in flight. Bounded by the client
    /// timeouts, which guarantee every fetch completes.
    fn settle(&mut self) {
        let deadline = Instant::now() + self.settle_limit;
        while !is_settled(&self.state) {
            if Instant::now() >= deadline {
                dir_warn!("gave up waiting for in-flight requests");
                return;
            }
            if let Some(msg) = self.runner.wait(TICK) {
                self.dispatch(msg);
            }
        }
    }

    /// Runs one prompt line. Commands apply in order: anything still in
    /// flight lands first. Returns `false` on `quit`.
    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        match parse_command(line) {
            Ok(command) => match command.into_msg() {
                Some(msg) => {
                    self.settle();
                    self.dispatch(msg);
                }
                None => return Ok(false),
            },
            Err(CommandError::Empty) => {}
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(true)
    }

    /// Prints a frame when the state changed since the last one.
    fn render_if_dirty(&mut self, out: &mut impl Write) -> io::Result<bool> {
        if !self.state.consume_dirty() {
            return Ok(false);
        }
        writeln!(out)?;
        for line in render::render(&self.state.view()) {
            writeln!(out, "{line}")?;
        }
        Ok(true)
    }
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()
}

/// Reads stdin on its own thread so the loop can keep polling the engine.
fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line_tx.send(line).is_err() {
                break;
            }
        }
        dir_debug!("input closed");
    });
    line_rx
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use directory_core::{
        ExperienceRecord, FilterSet, MemberId, ProfessionalRecord, ResultPage, PAGE_SIZE,
    };
    use directory_engine::{ApiError, DirectoryApi, EngineHandle};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Answers every window in full, after a short delay.
    struct FullWindowApi {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DirectoryApi for FullWindowApi {
        async fn fetch_professionals(
            &self,
            _filters: &FilterSet,
            window_size: usize,
        ) -> Result<ResultPage, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(ResultPage::Many(
                (0..window_size)
                    .map(|i| ProfessionalRecord::with_id(i.to_string()))
                    .collect(),
            ))
        }

        async fn fetch_experiences(
            &self,
            _person_id: &str,
            _company_query: Option<&str>,
        ) -> Result<Vec<ExperienceRecord>, ApiError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(vec![ExperienceRecord {
                title: Some("CTO".to_string()),
                ..ExperienceRecord::default()
            }])
        }
    }

    fn app_with(api: Arc<FullWindowApi>, filters: FilterSet) -> App {
        let engine = EngineHandle::with_api(api).expect("engine starts");
        App::new(
            DirectoryState::with_filters(filters),
            EffectRunner::with_engine(engine),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn startup_loads_without_filters() {
        let (state, effects) = startup(DirectoryState::new());

        assert!(state.is_loading());
        assert_eq!(
            effects,
            vec![Effect::FetchProfessionals {
                request: 1,
                filters: FilterSet::new(),
                window_size: PAGE_SIZE,
            }]
        );
    }

    #[test]
    fn startup_uses_the_initial_filters() {
        let (_, effects) = startup(DirectoryState::with_filters(FilterSet::new().job("Sales")));

        match effects.as_slice() {
            [Effect::FetchProfessionals { filters, .. }] => {
                assert_eq!(filters, &FilterSet::new().job("Sales"));
            }
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn commands_wait_for_the_request_in_flight() {
        let api = Arc::new(FullWindowApi {
            calls: AtomicUsize::new(0),
        });
        let mut app = app_with(api.clone(), FilterSet::new());
        let mut out = Vec::new();

        // Typed back to back, before the first answer can arrive.
        assert!(app.handle_line("search --company 1035", &mut out).unwrap());
        assert!(app.handle_line("more", &mut out).unwrap());
        app.settle();

        assert!(is_settled(&app.state));
        assert_eq!(app.state.window_size(), 2 * PAGE_SIZE);
        assert_eq!(app.state.items().len(), 2 * PAGE_SIZE);
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn end_of_input_renders_the_answer() {
        let api = Arc::new(FullWindowApi {
            calls: AtomicUsize::new(0),
        });
        let mut app = app_with(api, FilterSet::new().company("1035"));
        let mut out = Vec::new();

        app.start();
        app.settle();
        assert!(app.render_if_dirty(&mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  1. (unnamed) [0]  Score: ?"), "{text}");
        assert!(!text.contains("Loading..."), "{text}");
    }

    #[test]
    fn settle_waits_for_experiences() {
        let api = Arc::new(FullWindowApi {
            calls: AtomicUsize::new(0),
        });
        let mut app = app_with(api, FilterSet::new());
        app.start();
        app.settle();

        let mut out = Vec::new();
        assert!(app.handle_line("open 3", &mut out).unwrap());
        assert!(!is_settled(&app.state));
        app.settle();

        let panel = app.state.detail().expect("detail open");
        assert_eq!(panel.member_id(), &MemberId::from("3"));
        assert!(matches!(panel.experiences(), ExperienceLoad::Loaded(rows) if rows.len() == 1));
    }

    #[test]
    fn quit_stops_the_loop() {
        let api = Arc::new(FullWindowApi {
            calls: AtomicUsize::new(0),
        });
        let mut app = app_with(api, FilterSet::new());
        let mut out = Vec::new();

        assert!(!app.handle_line("quit", &mut out).unwrap());
        assert!(app.handle_line("frobnicate", &mut out).unwrap());
        assert!(!out.is_empty());
    }
}
