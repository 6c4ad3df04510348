use std::env;
use std::io;
use std::process;
use std::sync::mpsc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use taskpad::config::{self, Command, Config};
use taskpad::controller::TaskController;
use taskpad::feedback::{BellFeedback, ChannelFeedback, Silent};
use taskpad::log::SessionLogger;
use taskpad::plain::{self, PlainOptions};
use taskpad::session::Session;
use taskpad::shutdown::{self, ShutdownSignal};
use taskpad::tui::{self, TuiOptions};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = env::args().collect();
    let cli = config::parse_args(args);

    if cli.help {
        print_help();
        return;
    }

    if cli.version {
        println!("taskpad {}", VERSION);
        return;
    }

    if let Some(ref unknown) = cli.unknown_command {
        eprintln!("error: unknown command '{}'", unknown);
        eprintln!("Run 'taskpad --help' for usage.");
        process::exit(1);
    }

    // Default command is Run if none specified
    let command = cli.command.clone().unwrap_or(Command::Run);

    let result = match command {
        Command::Run => match Config::load(&cli) {
            Ok(config) => cmd_run(&config),
            Err(e) => Err(e.to_string()),
        },
        Command::InitConfig => cmd_init_config(),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn print_help() {
    println!(
        r#"taskpad - a single-screen terminal task list

USAGE:
    taskpad [OPTIONS] [COMMAND]

COMMANDS:
    run               Open the task list (default)
    init-config       Print a default taskpad.toml to stdout

OPTIONS:
    -h, --help              Show this help message
    -V, --version           Show version
    -c, --config <PATH>     Path to config file (default: taskpad.toml)
    --title <TEXT>          Header title (default: Task Manager)
    --seed <N>              Seed the priority generator for repeatable runs
    --log-file <PATH>       Append a session log to PATH
    --no-tui                Line mode: read commands from stdin
    --no-color              Plain line-mode output
    --no-mouse              Don't capture the mouse in the TUI
    --no-feedback           Disable feedback pulses
    --bell                  Ring the terminal bell on feedback pulses

TUI KEYS:
    a / Tab                 Type a new task (Enter adds, Esc stops typing)
    Up/Down, j/k            Move the cursor
    Space / Enter           Toggle completion
    o                       Show task details (Esc closes)
    d / Delete              Delete task
    q / Ctrl+C              Quit
    Mouse: left click toggles, right click shows details, click the
    cross at the end of a row to delete.

Tasks are kept in memory only and are discarded on exit.

EXAMPLES:
    taskpad                            Open the task list
    taskpad --seed 42 --log-file s.log Repeatable run with a session log
    printf 'add Buy milk\nlist\n' | taskpad --no-tui
"#
    );
}

/// Print the default configuration file.
fn cmd_init_config() -> Result<(), String> {
    print!("{}", Config::default_toml());
    Ok(())
}

/// Open the task list in the configured front-end.
fn cmd_run(config: &Config) -> Result<(), String> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let controller = TaskController::new(rng);

    if config.no_tui {
        run_plain(config, controller)
    } else {
        run_tui(config, controller)
    }
}

fn attach_logger(config: &Config, session: Session<StdRng>) -> Session<StdRng> {
    match config.log_file {
        Some(ref path) => session
            .with_logger(SessionLogger::new(path).with_max_lines(config.log_max_lines)),
        None => session,
    }
}

fn run_plain(config: &Config, controller: TaskController<StdRng>) -> Result<(), String> {
    let controller = if config.feedback_enabled && config.feedback_bell {
        controller.with_feedback(BellFeedback)
    } else {
        controller.with_feedback(Silent)
    };

    let mut session = attach_logger(config, Session::new(controller));
    session.start("plain");
    if let Some(e) = session.take_log_error() {
        eprintln!("warning: session log disabled: {}", e);
    }

    if let Err(e) = shutdown::register_handler() {
        eprintln!("warning: {}", e);
    }

    let options = PlainOptions {
        title: config.title.clone(),
        use_color: config.color,
    };
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    plain::run_plain(
        &mut session,
        stdin.lock(),
        &mut stdout,
        &options,
        &ShutdownSignal::new(),
    )
    .map_err(|e| format!("line mode failed: {}", e))
}

fn run_tui(config: &Config, controller: TaskController<StdRng>) -> Result<(), String> {
    let (tx, rx) = mpsc::channel();
    let controller = if config.feedback_enabled {
        controller.with_feedback(ChannelFeedback::new(tx))
    } else {
        controller.with_feedback(Silent)
    };

    let mut session = attach_logger(config, Session::new(controller));
    session.start("tui");
    // Reported once the terminal is restored
    let start_error = session.take_log_error();

    let options = TuiOptions {
        title: config.title.clone(),
        bell: config.feedback_bell,
        mouse: config.mouse,
    };
    let warning = tui::run_tui(session, rx, options).map_err(|e| format!("TUI error: {}", e))?;

    if let Some(e) = start_error.or(warning) {
        eprintln!("warning: session log disabled: {}", e);
    }
    Ok(())
}
