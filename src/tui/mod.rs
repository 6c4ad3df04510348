mod app;
mod render;
mod run;

pub use app::{TuiApp, TuiOptions};
pub use run::run_tui;
