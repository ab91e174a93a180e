use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use docchat_core::{update, AppState, AppViewModel, ControllerError, FileHandle, Msg};
use docchat_logging::{chat_debug, chat_info, chat_warn};

use super::cli::{Cli, Command};
use super::config::AppConfig;
use super::effects::{EffectRunner, Surface};
use super::input::{self, Input};
use super::logging::{self, LogDestination};
use super::ui::constants::*;
use super::ui::render::{self, Line, Renderer};

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(LogDestination::from_verbose(cli.verbose));

    let config = AppConfig::load(cli.config.as_deref())?.with_backend_url(cli.backend_url);
    chat_info!("Starting docchat against {}", config.backend_base_url);

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => run_interactive(&config),
        Command::Upload { files } => run_once(
            &config,
            vec![
                Msg::FilesSelected(files.into_iter().map(FileHandle::from).collect()),
                Msg::UploadClicked,
            ],
        ),
        Command::Ask { question } => run_once(
            &config,
            vec![Msg::DraftChanged(question.join(" ")), Msg::AskClicked],
        ),
    }
}

enum AppEvent {
    Settled(Msg),
    Input(Input),
    InputClosed,
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
}

impl Session {
    fn new(config: &AppConfig, msg_tx: mpsc::Sender<Msg>) -> anyhow::Result<Self> {
        Ok(Self {
            state: AppState::new(),
            runner: EffectRunner::new(config.backend_settings(), msg_tx)?,
            renderer: Renderer::default(),
        })
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Applies one message, runs its effects and prints whatever changed.
    /// Returns the first failure surfaced along the way.
    fn dispatch(&mut self, msg: Msg) -> Option<ControllerError> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let lines = if state.consume_dirty() {
            self.renderer.render(&state.view())
        } else {
            Vec::new()
        };
        self.state = state;

        let surfaced = self.runner.run(effects);
        print_lines(&lines);

        let mut failure = None;
        for surface in surfaced {
            print_lines(&render::render_surface(&surface));
            if let Surface::Failure(err) = surface {
                failure.get_or_insert(err);
            }
        }
        failure
    }
}

fn print_lines(lines: &[Line]) {
    for line in lines {
        line.print();
    }
}

fn prompt() {
    print!("{PROMPT}");
    let _ = io::stdout().flush();
}

/// Runs a fixed sequence of messages, waits for the request to settle and
/// reports the first failure as the process error.
fn run_once(config: &AppConfig, msgs: Vec<Msg>) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut session = Session::new(config, msg_tx)?;

    let mut failure = None;
    for msg in msgs {
        if let Some(err) = session.dispatch(msg) {
            failure.get_or_insert(err);
        }
    }
    while session.is_busy() {
        let msg = msg_rx
            .recv()
            .context("request worker stopped before the request settled")?;
        if let Some(err) = session.dispatch(msg) {
            failure.get_or_insert(err);
        }
    }

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn run_interactive(config: &AppConfig) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let mut session = Session::new(config, msg_tx)?;

    spawn_settlement_forwarder(msg_rx, event_tx.clone());
    spawn_input_reader(event_tx);

    println!("{BANNER}");
    prompt();

    let mut interactive = Interactive::new(session);
    while let Ok(event) = event_rx.recv() {
        if interactive.handle_event(event) == Flow::Exit {
            break;
        }
    }

    chat_info!("Session ended");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputOutcome {
    Handled,
    /// The input would start a request while one is in flight.
    Rejected,
    Quit,
}

/// Event handling for the interactive session. Leaving is deferred until
/// nothing is in flight.
struct Interactive {
    session: Session,
    quitting: bool,
    announced_wait: bool,
}

impl Interactive {
    fn new(session: Session) -> Self {
        Self {
            session,
            quitting: false,
            announced_wait: false,
        }
    }

    fn handle_event(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Settled(msg) => {
                self.session.dispatch(msg);
            }
            AppEvent::Input(input) => {
                if handle_input(&mut self.session, input) == InputOutcome::Quit {
                    self.quitting = true;
                }
            }
            AppEvent::InputClosed => {
                chat_debug!("Input closed");
                self.quitting = true;
            }
        }

        if self.quitting {
            if !self.session.is_busy() {
                return Flow::Exit;
            }
            if !self.announced_wait {
                Line::Status(WAITING_TO_QUIT.to_string()).print();
                self.announced_wait = true;
            }
        } else if !self.session.is_busy() {
            prompt();
        }
        Flow::Continue
    }
}

fn handle_input(session: &mut Session, input: Input) -> InputOutcome {
    match input {
        Input::Quit => return InputOutcome::Quit,
        Input::Help => println!("{}", input::help_text()),
        Input::History => print_lines(&render::render_history(&session.view())),
        Input::Unknown(name) => Line::Failure(format!(
            "{FAILURE_PREFIX}Unknown command /{name}; type /help for the list."
        ))
        .print(),
        input if input.needs_idle() && !session.view().actions_enabled() => {
            chat_info!("Rejected input while a request is in flight");
            Line::Status(BUSY_HINT.to_string()).print();
            return InputOutcome::Rejected;
        }
        input => {
            for msg in input.into_msgs() {
                session.dispatch(msg);
            }
        }
    }
    InputOutcome::Handled
}

fn spawn_settlement_forwarder(msg_rx: mpsc::Receiver<Msg>, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for msg in msg_rx {
            if event_tx.send(AppEvent::Settled(msg)).is_err() {
                break;
            }
        }
    });
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if event_tx.send(AppEvent::Input(input::parse_line(&line))).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    chat_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}
