use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::RngCore;
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::{TuiApp, TuiOptions};
use super::render::draw_ui;
use crate::feedback::Intensity;
use crate::session::Session;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the TUI application until the user quits.
///
/// `pulses` must be the receiving end of the channel the session's controller
/// reports feedback on. Returns the first session log failure, if any, so it
/// can be printed once the terminal is restored.
pub fn run_tui<R: RngCore>(
    session: Session<R>,
    pulses: Receiver<Intensity>,
    options: TuiOptions,
) -> io::Result<Option<String>> {
    let mouse = options.mouse;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if mouse {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TuiApp::new(session, pulses, options);
    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    result.map(|()| app.take_log_warning())
}

fn event_loop<R: RngCore>(terminal: &mut Term, app: &mut TuiApp<R>) -> io::Result<()> {
    terminal.clear()?;

    loop {
        let now = Instant::now();
        app.process_pulses(now);

        let mut hitboxes = app.hitboxes;
        terminal.draw(|f| {
            hitboxes = draw_ui(f, app, now);
        })?;
        app.hitboxes = hitboxes;

        if app.take_bell() {
            // A lost bell is not worth stopping for
            let backend = terminal.backend_mut();
            let _ = backend.write_all(b"\x07");
            let _ = backend.flush();
        }

        // Short poll timeout so pulses fade without input
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key.code, key.modifiers);
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse.kind, mouse.column, mouse.row);
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
