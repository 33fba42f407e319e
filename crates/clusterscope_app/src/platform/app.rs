use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use clusterscope_core::{update, AnalysisPhase, AppState, Msg};
use clusterscope_logging::{level_for_verbosity, scope_debug, scope_error, scope_info};

use super::cli::{AnalyzeArgs, Command as CliCommand, Opts};
use super::config::{load_config, write_default_config, AppConfig};
use super::effects::{EffectReport, EffectRunner};
use super::logging::{self, LogDestination};
use super::ui;
use super::ui::commands::Command;
use super::ui::render::StatusLine;

/// Everything the dispatch loop reacts to.
#[derive(Debug)]
pub enum Inbound {
    Command(Command),
    Msg(Msg),
    InputClosed,
}

pub fn run_app() -> ExitCode {
    let opts = Opts::parse();
    let destination = if opts.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    logging::initialize(destination, level_for_verbosity(opts.verbosity()));

    match run(opts) {
        Ok(code) => code,
        Err(err) => {
            scope_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: Opts) -> anyhow::Result<ExitCode> {
    let mut config = load_config(&opts.config);
    if let Some(endpoint) = &opts.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(dir) = &opts.download_dir {
        config.download_dir = dir.clone();
    }

    match opts.command {
        Some(CliCommand::InitConfig) => {
            write_default_config(&opts.config)?;
            println!("Wrote {}", opts.config.display());
            Ok(ExitCode::SUCCESS)
        }
        Some(CliCommand::Analyze(args)) => {
            validate_endpoint(&config)?;
            run_once(&config, args)
        }
        Some(CliCommand::Interactive) | None => {
            validate_endpoint(&config)?;
            run_interactive(&config)
        }
    }
}

fn validate_endpoint(config: &AppConfig) -> anyhow::Result<()> {
    let url = config
        .client_settings()
        .endpoint_url()
        .with_context(|| format!("endpoint `{}`", config.endpoint))?;
    scope_info!("Using endpoint {}", url);
    Ok(())
}

/// Owns the view state and applies one message at a time.
struct Session {
    state: AppState,
    runner: EffectRunner,
    status: StatusLine,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            status: StatusLine::default(),
        }
    }

    fn is_busy(&self) -> bool {
        self.state.phase() != AnalysisPhase::Idle
    }

    fn dispatch(&mut self, msg: Msg) -> EffectReport {
        scope_debug!("dispatch {}", msg_name(&msg));
        let was_busy = self.is_busy();
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if was_busy && !self.is_busy() {
            self.status.last_completed = Some(Local::now());
        }
        let report = self.runner.run(effects);
        show_report(&report);
        report
    }

    fn render(&self) {
        print!("{}", ui::render::render(&self.state.view(), &self.status));
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn remove_row(&mut self, row: usize) {
        let entry_id = self
            .state
            .view()
            .files
            .get(row - 1)
            .map(|file| file.entry_id);
        match entry_id {
            Some(entry_id) => {
                self.dispatch(Msg::EntryRemoved { entry_id });
            }
            None => eprintln!("! no file in row {row}"),
        }
    }
}

fn show_report(report: &EffectReport) {
    for alert in &report.alerts {
        eprintln!("! {alert}");
    }
    for saved in &report.saved {
        if saved.replaced {
            println!("Saved {} (replaced)", saved.path.display());
        } else {
            println!("Saved {}", saved.path.display());
        }
    }
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::FilesSelected(_) => "FilesSelected",
        Msg::DragEntered => "DragEntered",
        Msg::DragLeft => "DragLeft",
        Msg::FilesDropped(_) => "FilesDropped",
        Msg::EntryRemoved { .. } => "EntryRemoved",
        Msg::TextChanged(_) => "TextChanged",
        Msg::MethodClicked(_) => "MethodClicked",
        Msg::AnalyzeClicked => "AnalyzeClicked",
        Msg::AnalysisSucceeded { .. } => "AnalysisSucceeded",
        Msg::AnalysisFailed { .. } => "AnalysisFailed",
        Msg::DownloadClusterClicked { .. } => "DownloadClusterClicked",
        Msg::DownloadAllClicked => "DownloadAllClicked",
    }
}

fn run_interactive(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbound>();
    let runner = EffectRunner::new(config, inbox_tx.clone()).context("starting engine")?;
    let mut session = Session::new(runner);

    spawn_stdin_reader(inbox_tx);

    print!("{}", ui::layout::initial_screen());
    session.render();
    prompt();
    scope_info!("Interactive session started");

    drive_session(&mut session, &inbox_rx);

    scope_info!("Interactive session ended");
    Ok(ExitCode::SUCCESS)
}

/// Handles inbound items until `quit`, or until input is closed and no
/// analysis is in flight.
fn drive_session(session: &mut Session, inbox: &mpsc::Receiver<Inbound>) {
    let mut input_closed = false;
    while let Ok(inbound) = inbox.recv() {
        match inbound {
            Inbound::Command(command) => match command {
                Command::Dispatch(msgs) => {
                    for msg in msgs {
                        session.dispatch(msg);
                    }
                }
                Command::RemoveRow(row) => session.remove_row(row),
                Command::Show => session.render(),
                Command::Help => println!("{}", ui::layout::HELP),
                Command::Quit => break,
                Command::Empty => {}
                Command::Invalid(message) => eprintln!("! {message}"),
            },
            Inbound::Msg(msg) => {
                session.dispatch(msg);
            }
            Inbound::InputClosed => input_closed = true,
        }

        session.render_if_dirty();
        if input_closed && !session.is_busy() {
            break;
        }
        if !input_closed {
            prompt();
        }
    }
}

fn spawn_stdin_reader(inbox: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    scope_error!("Failed to read input: {}", err);
                    break;
                }
            };
            let command = ui::commands::parse_line(&line);
            let quit = command == Command::Quit;
            if inbox.send(Inbound::Command(command)).is_err() || quit {
                return;
            }
        }
        let _ = inbox.send(Inbound::InputClosed);
    });
}

fn prompt() {
    print!("{}", ui::layout::PROMPT);
    let _ = io::stdout().flush();
}

/// How a one-shot `analyze` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Succeeded,
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Succeeded => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

fn run_once(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<ExitCode> {
    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbound>();
    let runner = EffectRunner::new(config, inbox_tx).context("starting engine")?;
    let mut session = Session::new(runner);

    // The request timeout bounds the call; the margin covers reading files.
    let wait = Duration::from_secs(config.request_timeout_secs + config.connect_timeout_secs + 5);
    let outcome = analyze_once(&mut session, &inbox_rx, args, wait)?;
    scope_info!("One-shot analysis {:?}", outcome);
    Ok(outcome.into())
}

/// Replays the analyze gestures, waits for the completion and optionally
/// saves the combined download.
fn analyze_once(
    session: &mut Session,
    inbox: &mpsc::Receiver<Inbound>,
    args: AnalyzeArgs,
    wait: Duration,
) -> anyhow::Result<Outcome> {
    let mut msgs = vec![Msg::MethodClicked(args.method)];
    if let Some(text) = args.text {
        msgs.push(Msg::TextChanged(text));
    }
    if !args.files.is_empty() {
        let files = args
            .files
            .into_iter()
            .map(ui::commands::read_selected_file)
            .collect::<Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)?;
        msgs.push(Msg::FilesSelected(files));
    }
    msgs.push(Msg::AnalyzeClicked);

    let mut alerted = false;
    for msg in msgs {
        alerted |= !session.dispatch(msg).alerts.is_empty();
    }
    if alerted || !session.is_busy() {
        return Ok(Outcome::Failed);
    }

    while session.is_busy() {
        match inbox.recv_timeout(wait) {
            Ok(Inbound::Msg(msg)) => {
                alerted |= !session.dispatch(msg).alerts.is_empty();
            }
            Ok(_) => {}
            Err(err) => anyhow::bail!("no response from the engine: {err}"),
        }
    }

    session.render();
    if alerted {
        return Ok(Outcome::Failed);
    }

    if args.download_all && !session.dispatch(Msg::DownloadAllClicked).alerts.is_empty() {
        return Ok(Outcome::Failed);
    }
    Ok(Outcome::Succeeded)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    use clusterscope_core::{
        AnalysisPayload, AnalysisRequest, AnalysisResult, ClusteringMethod, Msg,
        ALL_CLUSTERS_FILENAME,
    };
    use clusterscope_engine::{AnalysisClient, AnalyzeError, FailureKind};
    use tempfile::TempDir;

    use super::{analyze_once, drive_session, Inbound, Outcome, Session};
    use crate::platform::cli::AnalyzeArgs;
    use crate::platform::config::AppConfig;
    use crate::platform::effects::EffectRunner;
    use crate::platform::ui::commands::Command;

    const WAIT: Duration = Duration::from_secs(5);

    /// One cluster per input line, or a server error for every request.
    struct FakeClient {
        fail: bool,
    }

    #[async_trait::async_trait]
    impl AnalysisClient for FakeClient {
        async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
            let text = match (&request.payload, self.fail) {
                (AnalysisPayload::Text(text), false) => text,
                _ => {
                    return Err(AnalyzeError {
                        kind: FailureKind::HttpStatus(500),
                        message: "500 Internal Server Error".to_string(),
                    })
                }
            };
            Ok(AnalysisResult::from_entries(
                text.lines()
                    .enumerate()
                    .map(|(i, line)| (i.to_string(), vec![line.to_string()])),
            ))
        }
    }

    fn session(
        fail: bool,
        download_dir: &Path,
    ) -> (Session, mpsc::Sender<Inbound>, mpsc::Receiver<Inbound>) {
        let config = AppConfig {
            download_dir: download_dir.to_path_buf(),
            ..AppConfig::default()
        };
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::with_client(&config, Arc::new(FakeClient { fail }), tx.clone())
            .expect("engine");
        (Session::new(runner), tx, rx)
    }

    fn args(text: Option<&str>, download_all: bool) -> AnalyzeArgs {
        AnalyzeArgs {
            method: ClusteringMethod::Neural,
            text: text.map(str::to_string),
            files: Vec::new(),
            download_all,
        }
    }

    #[test]
    fn analyze_without_input_fails_before_submitting() {
        let temp = TempDir::new().unwrap();
        let (mut session, _tx, rx) = session(false, temp.path());

        let outcome = analyze_once(&mut session, &rx, args(None, true), WAIT).unwrap();
        assert_eq!(outcome, Outcome::Failed);
        assert!(!session.is_busy());
        assert!(rx.try_recv().is_err());
        assert!(!temp.path().join(ALL_CLUSTERS_FILENAME).exists());
    }

    #[test]
    fn analyze_with_server_error_fails() {
        let temp = TempDir::new().unwrap();
        let (mut session, _tx, rx) = session(true, temp.path());

        let outcome = analyze_once(&mut session, &rx, args(Some("one"), true), WAIT).unwrap();
        assert_eq!(outcome, Outcome::Failed);
        assert!(session.state.results().is_none());
        assert!(!temp.path().join(ALL_CLUSTERS_FILENAME).exists());
    }

    #[test]
    fn analyze_with_download_all_writes_combined_file() {
        let temp = TempDir::new().unwrap();
        let (mut session, _tx, rx) = session(false, temp.path());

        let outcome =
            analyze_once(&mut session, &rx, args(Some("alpha\nbeta"), true), WAIT).unwrap();
        assert_eq!(outcome, Outcome::Succeeded);
        assert_eq!(
            fs::read_to_string(temp.path().join(ALL_CLUSTERS_FILENAME)).unwrap(),
            "Cluster 0:\nalpha\n\nCluster 1:\nbeta"
        );
    }

    #[test]
    fn analyze_without_download_all_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let (mut session, _tx, rx) = session(false, temp.path());

        let outcome = analyze_once(&mut session, &rx, args(Some("alpha"), false), WAIT).unwrap();
        assert_eq!(outcome, Outcome::Succeeded);
        assert_eq!(session.state.results().map(|r| r.len()), Some(1));
        assert!(!temp.path().join(ALL_CLUSTERS_FILENAME).exists());
    }

    #[test]
    fn closed_input_waits_for_the_request_in_flight() {
        let temp = TempDir::new().unwrap();
        let (mut session, tx, rx) = session(false, temp.path());

        tx.send(Inbound::Command(Command::Dispatch(vec![
            Msg::MethodClicked(ClusteringMethod::Ontology),
            Msg::TextChanged("first\nsecond".to_string()),
            Msg::AnalyzeClicked,
        ])))
        .unwrap();
        // Queued before the completion can arrive.
        tx.send(Inbound::InputClosed).unwrap();

        drive_session(&mut session, &rx);
        assert!(!session.is_busy());
        assert_eq!(session.state.results().map(|r| r.len()), Some(2));
        assert!(session.status.last_completed.is_some());
    }

    #[test]
    fn quit_stops_the_loop_immediately() {
        let temp = TempDir::new().unwrap();
        let (mut session, tx, rx) = session(false, temp.path());

        tx.send(Inbound::Command(Command::Quit)).unwrap();
        tx.send(Inbound::Command(Command::Dispatch(vec![Msg::TextChanged(
            "late".to_string(),
        )])))
        .unwrap();

        drive_session(&mut session, &rx);
        assert_eq!(session.state.text(), "");
    }
}
