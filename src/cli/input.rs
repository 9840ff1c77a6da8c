//! Interactive keyboard input.
//!
//! Each stdin line is one command. Matching is case-insensitive and ignores
//! surrounding whitespace, except that a line consisting of a single space
//! toggles the timer.
//!
//! `config <duration> <warning> <critical>` takes minutes and replaces the
//! timer configuration while the exam is idle.

use crate::driver::Command;
use crate::types::{TimerConfig, ViolationType};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
    Empty,
    /// A recognized command with unusable arguments.
    Invalid(String),
    Unknown(String),
}

/// Parses one line typed by the proctor.
pub fn parse_line(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    if line == " " {
        return Input::Command(Command::Toggle);
    }

    let lowered = line.trim().to_ascii_lowercase();
    let mut words = lowered.split_whitespace();
    let word = words.next().unwrap_or("");
    if word == "config" {
        return parse_config(words.collect());
    }

    let command = match lowered.as_str() {
        "" => return Input::Empty,
        "h" | "help" => return Input::Help,
        "s" | "start" => Command::Start,
        "p" | "pause" => Command::Pause,
        "t" | "toggle" | "space" => Command::Toggle,
        "r" | "reset" => Command::Reset,
        "1" | "faces" => Command::AddViolation(ViolationType::MultipleFaces),
        "2" | "tab" => Command::AddViolation(ViolationType::TabSwitch),
        "3" | "app" => Command::AddViolation(ViolationType::ProhibitedApp),
        "m" | "mute" => Command::ToggleSound,
        "?" | "status" => Command::Status,
        "q" | "quit" | "exit" => Command::Shutdown,
        _ => return Input::Unknown(line.trim().to_string()),
    };
    Input::Command(command)
}

fn parse_config(args: Vec<&str>) -> Input {
    let &[duration, warning, critical] = args.as_slice() else {
        return Input::Invalid("usage: config <duration> <warning> <critical> (minutes)".to_string());
    };
    let minutes = |value: &str| {
        value
            .parse::<u32>()
            .map_err(|_| format!("'{}' is not a whole number of minutes", value))
    };
    let parsed = minutes(duration).and_then(|d| {
        let w = minutes(warning)?;
        let c = minutes(critical)?;
        TimerConfig::from_minutes(d, w, c).map_err(|e| format!("invalid configuration: {}", e))
    });
    match parsed {
        Ok(config) => Input::Command(Command::Configure(config)),
        Err(message) => Input::Invalid(message),
    }
}

/// Key reference printed by `help`.
pub const HELP: &[(&str, &str)] = &[
    ("s, start", "start or resume the exam"),
    ("p, pause", "pause the exam"),
    ("t, space", "toggle start/pause"),
    ("r, reset", "reset timer, violations and alerts"),
    ("1, faces", "record: multiple faces detected"),
    ("2, tab", "record: tab switch detected"),
    ("3, app", "record: prohibited application detected"),
    ("m, mute", "toggle alert tones"),
    ("config D W C", "set duration, warning and critical minutes (idle only)"),
    ("?, status", "show session summary"),
    ("h, help", "show this help"),
    ("q, quit", "end the session"),
];
