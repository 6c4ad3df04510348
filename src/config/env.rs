use super::types::Config;

/// Apply `TASKPAD_*` variables (and `NO_COLOR`) through `lookup`.
pub(super) fn apply_env<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("TASKPAD_TITLE") {
        config.title = val;
    }
    if let Some(val) = lookup("TASKPAD_MOUSE") {
        config.mouse = is_truthy(&val);
    }
    if let Some(val) = lookup("TASKPAD_FEEDBACK") {
        config.feedback_enabled = is_truthy(&val);
    }
    if let Some(val) = lookup("TASKPAD_BELL") {
        config.feedback_bell = is_truthy(&val);
    }
    if let Some(val) = lookup("TASKPAD_SEED") {
        if let Ok(n) = val.parse() {
            config.seed = Some(n);
        }
    }
    if let Some(val) = lookup("TASKPAD_LOG_FILE") {
        config.log_file = if val.is_empty() { None } else { Some(val) };
    }
    if let Some(val) = lookup("TASKPAD_LOG_MAX_LINES") {
        if let Ok(n) = val.parse() {
            config.log_max_lines = n;
        }
    }
    if let Some(val) = lookup("TASKPAD_NO_TUI") {
        config.no_tui = is_truthy(&val);
    }
    // https://no-color.org: any non-empty value disables color
    if let Some(val) = lookup("NO_COLOR") {
        if !val.is_empty() {
            config.color = false;
        }
    }
}

fn is_truthy(val: &str) -> bool {
    val == "true" || val == "1"
}
