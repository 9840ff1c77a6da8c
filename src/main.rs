//! Proctor Timer CLI - exam countdown with violation tracking
//!
//! Runs a proctored exam in the terminal:
//! - Countdown with warning and critical thresholds
//! - One-shot alerts with a notification banner and tone
//! - Keyboard shortcuts to record integrity violations

use std::io::{self, BufRead};
use std::thread;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tracing::{debug, info};

use proctor_timer::cli::{parse_line, Cli, Commands, ConfigArgs, Display, Input, RunArgs};
use proctor_timer::{
    try_create_player, Command, ExamSession, SessionDriver, SessionEvent, Settings,
    SilentTonePlayer, TerminalNotifier, TitleFormatter, ToneSink,
};

/// Title restored after the session and used as the base of the countdown title.
const WINDOW_TITLE: &str = "Proctor Timer";

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so that `--json` output stays machine readable.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run(args).await?,
        Some(Commands::Check(args)) => check(&args)?,
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Loads settings and applies flag overrides.
fn load_settings(args: &ConfigArgs) -> Result<Settings> {
    let settings = Settings::load(args.config.as_deref()).context("could not load settings")?;
    Ok(args.apply(settings))
}

/// Prints the effective configuration or fails on invalid values.
fn check(args: &ConfigArgs) -> Result<()> {
    let settings = load_settings(args)?;
    let config = settings.timer_config()?;

    let source = args
        .config
        .clone()
        .or_else(|| Settings::default_path().filter(|path| path.exists()));
    Display::show_config(&settings, &config, source.as_deref());
    Ok(())
}

/// Runs an interactive exam session until quit, Ctrl-C or end of input.
async fn run(args: RunArgs) -> Result<()> {
    let settings = load_settings(&args.config)?;
    let config = settings.timer_config()?;
    let sound_enabled = settings.sound_enabled && !args.no_sound;

    let tone: Box<dyn ToneSink> = match sound_enabled.then(try_create_player).flatten() {
        Some(player) => Box::new(player),
        None => {
            debug!("no audio output, alert tones are silent");
            Box::new(SilentTonePlayer)
        }
    };

    let mut session = ExamSession::new(config, Box::new(TerminalNotifier::stderr()), tone);
    session.set_sound_enabled(sound_enabled);
    session.set_recent_limit(settings.recent_limit);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    if !args.json {
        Display::show_banner(&config);
    }

    spawn_input_reader(command_tx.clone(), args.json);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received");
            let _ = command_tx.send(Command::Shutdown);
        }
    });

    let title = args.title.then(|| TitleFormatter::new(WINDOW_TITLE));
    let renderer = tokio::spawn(render_events(event_rx, title.clone(), args.json));

    let summary = SessionDriver::new(session, command_rx, event_tx).run().await;
    renderer.await.context("event renderer failed")?;

    if let Some(title) = &title {
        Display::set_terminal_title(title.original());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        Display::show_summary(&summary);
    }
    Ok(())
}

/// Renders session events until the driver drops its sender.
async fn render_events(
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    title: Option<TitleFormatter>,
    quiet: bool,
) {
    while let Some(event) = events.recv().await {
        if !quiet {
            Display::show_event(&event);
        }
        if let (Some(title), Some(snapshot)) = (&title, event.snapshot()) {
            Display::set_terminal_title(&title.render(
                snapshot.remaining_seconds,
                snapshot.phase,
                true,
            ));
        }
    }
}

/// Reads commands from stdin on a dedicated thread.
///
/// End of input ends the session.
fn spawn_input_reader(commands: mpsc::UnboundedSender<Command>, quiet: bool) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_line(&line) {
                Input::Command(command) => {
                    if commands.send(command).is_err() {
                        return;
                    }
                }
                Input::Help if !quiet => Display::show_help(),
                Input::Invalid(message) if !quiet => Display::show_invalid(&message),
                Input::Unknown(input) if !quiet => Display::show_unknown(&input),
                _ => {}
            }
        }
        debug!("input closed");
        let _ = commands.send(Command::Shutdown);
    });
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["proctor"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["proctor", "run", "--json"]);
        match cli.command {
            Some(Commands::Run(args)) => assert!(args.json),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["proctor", "check", "--duration", "30"]);
        match cli.command {
            Some(Commands::Check(args)) => assert_eq!(args.duration, Some(30)),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_load_settings_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"duration_minutes": 120}"#).unwrap();

        let args = ConfigArgs {
            warning: Some(20),
            config: Some(path),
            ..ConfigArgs::default()
        };
        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.duration_minutes, 120);
        assert_eq!(settings.warning_minutes, 20);
    }

    #[test]
    fn test_cli_command_is_consistent() {
        Cli::command().debug_assert();
    }
}
