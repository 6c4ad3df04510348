use std::fs;
use std::path::Path;

use super::types::{Config, ConfigError};

pub(super) fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
    parse_toml(&content)
}

pub(super) fn parse_toml(content: &str) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    let mut current_section = String::new();

    for line in content.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        // Handle section headers like [ui]
        if line.starts_with('[') && line.ends_with(']') {
            current_section = line[1..line.len() - 1].trim().to_string();
            continue;
        }

        let Some((key, value)) = parse_toml_line(line) else {
            return Err(ConfigError::Parse(format!("expected key = value: {}", line)));
        };

        let full_key = if current_section.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", current_section, key)
        };

        match full_key.as_str() {
            "ui.title" => config.title = parse_string(value),
            "ui.mouse" => config.mouse = parse_bool(&full_key, value)?,
            "feedback.enabled" => config.feedback_enabled = parse_bool(&full_key, value)?,
            "feedback.bell" => config.feedback_bell = parse_bool(&full_key, value)?,
            "rng.seed" => {
                config.seed = Some(
                    value
                        .parse()
                        .map_err(|_| ConfigError::Parse(format!("invalid rng.seed: {}", value)))?,
                );
            }
            "log.file" => {
                let path = parse_string(value);
                config.log_file = if path.is_empty() { None } else { Some(path) };
            }
            "log.max_lines" => {
                config.log_max_lines = value.parse().map_err(|_| {
                    ConfigError::Parse(format!("invalid log.max_lines: {}", value))
                })?;
            }
            _ => {} // Ignore unknown keys
        }
    }

    Ok(config)
}

/// Parse a TOML line into key-value pair.
fn parse_toml_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Drop a trailing `# comment`, ignoring `#` inside double quotes.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (idx, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..idx],
            _ => {}
        }
    }
    line
}

fn parse_string(value: &str) -> String {
    value.trim_matches('"').to_string()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim_matches('"').to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::Parse(format!("invalid {}: {}", key, value))),
    }
}
