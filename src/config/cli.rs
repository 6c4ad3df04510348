/// CLI arguments parsed from command line.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Subcommand to execute.
    pub command: Option<Command>,
    /// Positional argument that was not a known command.
    pub unknown_command: Option<String>,
    /// Path to config file.
    pub config: Option<String>,
    /// Header title.
    pub title: Option<String>,
    /// Priority generator seed.
    pub seed: Option<u64>,
    /// Session log file.
    pub log_file: Option<String>,
    /// Use line mode instead of the TUI.
    pub no_tui: bool,
    /// Disable ANSI colors in line mode.
    pub no_color: bool,
    /// Disable mouse capture.
    pub no_mouse: bool,
    /// Disable feedback pulses.
    pub no_feedback: bool,
    /// Ring the terminal bell on feedback.
    pub bell: bool,
    /// Show help.
    pub help: bool,
    /// Show version.
    pub version: bool,
}

/// taskpad subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the task list (default).
    Run,
    /// Print a default taskpad.toml.
    InitConfig,
}

impl Command {
    /// Parse command from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "run" => Some(Self::Run),
            "init-config" => Some(Self::InitConfig),
            _ => None,
        }
    }
}

/// Parse CLI arguments from an iterator.
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    // Skip program name
    args.next();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "-V" | "--version" => cli.version = true,
            "-c" | "--config" => cli.config = args.next(),
            "--title" => cli.title = args.next(),
            "--seed" => cli.seed = args.next().and_then(|s| s.parse().ok()),
            "--log-file" => cli.log_file = args.next(),
            "--no-tui" => cli.no_tui = true,
            "--no-color" => cli.no_color = true,
            "--no-mouse" => cli.no_mouse = true,
            "--no-feedback" => cli.no_feedback = true,
            "--bell" => cli.bell = true,
            _ if !arg.starts_with('-') && cli.command.is_none() => {
                cli.command = Command::parse(&arg);
                if cli.command.is_none() && cli.unknown_command.is_none() {
                    cli.unknown_command = Some(arg);
                }
            }
            _ => {} // Ignore unknown flags
        }
    }

    cli
}
