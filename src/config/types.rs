use std::path::Path;

use super::cli::CliArgs;
use super::{env, toml};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "taskpad.toml";

/// Default header title.
pub const DEFAULT_TITLE: &str = "Task Manager";

/// Default session log size before rotation.
pub const DEFAULT_LOG_MAX_LINES: usize = 1000;

/// taskpad configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Header title.
    pub title: String,
    /// Capture mouse clicks in the TUI.
    pub mouse: bool,
    /// Emit feedback pulses at all.
    pub feedback_enabled: bool,
    /// Ring the terminal bell on feedback pulses.
    pub feedback_bell: bool,
    /// Seed for the priority generator (entropy when unset).
    pub seed: Option<u64>,
    /// Session log file (logging disabled when unset).
    pub log_file: Option<String>,
    /// Session log size before rotation.
    pub log_max_lines: usize,
    /// Use line mode instead of the TUI.
    pub no_tui: bool,
    /// Colorize line-mode output.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            mouse: true,
            feedback_enabled: true,
            feedback_bell: false,
            seed: None,
            log_file: None,
            log_max_lines: DEFAULT_LOG_MAX_LINES,
            no_tui: false,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults.
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        Self::load_with(
            cli_args,
            |key| std::env::var(key).ok(),
            Path::new(DEFAULT_CONFIG_FILE),
        )
    }

    /// Load with an explicit environment lookup and default config path.
    ///
    /// An explicit `--config` file must exist. The default file is optional,
    /// but if present it must parse.
    pub fn load_with<F>(
        cli_args: &CliArgs,
        lookup: F,
        default_file: &Path,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ref path) = cli_args.config {
            config.merge_from(&Self::load_from_file(path)?);
        } else if default_file.exists() {
            config.merge_from(&Self::load_from_file(default_file)?);
        }

        env::apply_env(&mut config, lookup);
        config.apply_cli(cli_args);

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        toml::load_from_file(path)
    }

    /// Parse TOML content into configuration.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::parse_toml(content)
    }

    /// Apply CLI arguments.
    pub(super) fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(ref title) = args.title {
            self.title = title.clone();
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(ref path) = args.log_file {
            self.log_file = Some(path.clone());
        }
        if args.no_tui {
            self.no_tui = true;
        }
        if args.no_color {
            self.color = false;
        }
        if args.no_mouse {
            self.mouse = false;
        }
        if args.no_feedback {
            self.feedback_enabled = false;
        }
        if args.bell {
            self.feedback_bell = true;
        }
    }

    /// Merge values from another config (for file-based config).
    fn merge_from(&mut self, other: &Self) {
        self.title = other.title.clone();
        self.mouse = other.mouse;
        self.feedback_enabled = other.feedback_enabled;
        self.feedback_bell = other.feedback_bell;
        self.seed = other.seed;
        self.log_file = other.log_file.clone();
        self.log_max_lines = other.log_max_lines;
    }

    /// Generate default taskpad.toml content.
    pub fn default_toml() -> String {
        format!(
            r#"# taskpad configuration

[ui]
title = "{}"
mouse = true

[feedback]
enabled = true
bell = false

[rng]
# seed = 42  # fixed priority sequence; random when unset

[log]
# file = "taskpad.log"  # session log; disabled when unset
max_lines = {}
"#,
            DEFAULT_TITLE, DEFAULT_LOG_MAX_LINES
        )
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config I/O error: {}", msg),
            Self::Parse(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
