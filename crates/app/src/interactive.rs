use std::io::BufRead;

use prep_core::model::{SessionEvent, SessionPhase};
use services::{SessionDriver, SessionInput, SessionRunner, Step, TICK_PERIOD};
use tokio::sync::mpsc;
use tracing::debug;

use crate::render;

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Input(SessionInput),
    Help,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Command::Empty;
    };
    let event = match head.to_lowercase().as_str() {
        "start" => SessionEvent::Start,
        "n" | "next" => SessionEvent::Next,
        "p" | "prev" | "previous" => SessionEvent::Previous,
        "f" | "flag" => SessionEvent::ToggleFlagCurrent,
        "s" | "save" => SessionEvent::ToggleSaveCurrent,
        "submit" => SessionEvent::Submit,
        "q" | "quit" => return Command::Input(SessionInput::Quit),
        "help" | "?" => return Command::Help,
        "g" | "goto" => match words.next().and_then(one_based) {
            Some(index) => SessionEvent::GoTo(index),
            None => return Command::Unknown(line.to_owned()),
        },
        other => match one_based(other) {
            Some(option) => SessionEvent::SelectCurrent(option),
            None => return Command::Unknown(line.to_owned()),
        },
    };
    Command::Input(SessionInput::Event(event))
}

fn one_based(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}

/// Reads stdin on a plain thread so a pending read never holds the runtime
/// open after the session ends.
fn spawn_stdin_reader(tx: mpsc::Sender<SessionInput>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Command::Input(input) => {
                    if tx.blocking_send(input).is_err() {
                        return;
                    }
                }
                Command::Help => println!("{}", render::HELP),
                Command::Empty => {}
                Command::Unknown(raw) => println!("Unrecognised input `{raw}`. Type `help`."),
            }
        }
        let _ = tx.blocking_send(SessionInput::Quit);
    });
}

/// Run one session against the terminal until it is scored or abandoned.
pub async fn run(runner: SessionRunner) -> anyhow::Result<()> {
    let state = runner.state();
    if state.questions().is_empty() {
        println!("No questions available for {}.", state.key());
        return Ok(());
    }
    println!("{}", render::session_header(state));

    let mut driver = SessionDriver::spawn(runner, TICK_PERIOD);
    spawn_stdin_reader(driver.sender());

    loop {
        match driver.step().await {
            Step::Idle => {}
            Step::Applied(SessionEvent::Tick) => {
                let remaining = driver.runner().state().remaining_secs();
                if remaining % 60 == 0 || remaining <= 10 {
                    println!("{}", render::time_left(remaining));
                }
            }
            Step::Applied(_) => {
                let state = driver.runner().state();
                if state.phase() == SessionPhase::Active {
                    println!("{}", render::question(state));
                }
            }
            Step::Completed(result) => {
                println!("{}", render::summary(&result));
                if let Some(path) = driver.runner().results_path() {
                    println!("Results: {path}");
                }
                return Ok(());
            }
            Step::Rejected { event, error } => {
                debug!(?event, %error, "input rejected");
                println!("{error}");
            }
            Step::Quit => {
                println!("Session abandoned. Nothing was scored.");
                return Ok(());
            }
        }
    }
}
