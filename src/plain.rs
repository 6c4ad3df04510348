//! Line mode: a command-per-line front-end for terminals without a TUI,
//! pipes, and scripts.

use std::io::{self, BufRead, Write};

use rand::RngCore;

use crate::color;
use crate::config::DEFAULT_TITLE;
use crate::controller::{Intent, Outcome};
use crate::session::Session;
use crate::shutdown::ShutdownSignal;
use crate::task::{Task, TaskId};

const HELP: &str = "\
Commands:
  add <text>     Add a task (add alone submits the draft)
  draft <text>   Set the draft without submitting it
  toggle <n>     Toggle completion of task n
  delete <n>     Delete task n
  show <n>       Show details of task n
  close          Close the details view
  list           Show all tasks
  help           Show this help
  quit           Exit (tasks are not saved)";

/// A parsed line-mode command. Row numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Add(Option<String>),
    Draft(String),
    Toggle(usize),
    Delete(usize),
    Show(usize),
    Close,
    List,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl LineCommand {
    /// Parse one input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim().is_empty() {
            return Self::Empty;
        }

        let (word, rest) = match trimmed.split_once(' ') {
            Some((word, rest)) => (word, Some(rest)),
            None => (trimmed.trim_end(), None),
        };

        match word {
            "add" | "a" => Self::Add(rest.map(str::to_string)),
            "draft" => Self::Draft(rest.unwrap_or("").to_string()),
            "toggle" | "t" => Self::row(rest, Self::Toggle, word),
            "delete" | "rm" | "d" => Self::row(rest, Self::Delete, word),
            "show" | "open" | "s" => Self::row(rest, Self::Show, word),
            "close" | "c" => Self::Close,
            "list" | "ls" | "l" => Self::List,
            "help" | "h" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Invalid(format!("Unknown command: {} (type 'help')", word)),
        }
    }

    fn row(rest: Option<&str>, make: fn(usize) -> Self, word: &str) -> Self {
        match rest.map(str::trim).and_then(|s| s.parse::<usize>().ok()) {
            Some(n) if n > 0 => make(n),
            _ => Self::Invalid(format!("Usage: {} <n> (row number from 'list')", word)),
        }
    }
}

/// Line mode presentation settings.
#[derive(Debug, Clone)]
pub struct PlainOptions {
    pub title: String,
    pub use_color: bool,
}

impl Default for PlainOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            use_color: false,
        }
    }
}

/// Run line mode until EOF, `quit`, or a shutdown request.
pub fn run_plain<R, I, W>(
    session: &mut Session<R>,
    mut input: I,
    out: &mut W,
    options: &PlainOptions,
    signal: &ShutdownSignal,
) -> io::Result<()>
where
    R: RngCore,
    I: BufRead,
    W: Write,
{
    let mut printer = Printer {
        out,
        title: &options.title,
        use_color: options.use_color,
    };
    printer.list(session)?;

    // Raw bytes so a stray non-UTF-8 line cannot end the session
    let mut buf = Vec::new();
    loop {
        if signal.is_shutdown() {
            break;
        }
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let keep_going = execute(session, LineCommand::parse(&line), &mut printer)?;
        if let Some(e) = session.take_log_error() {
            eprintln!("warning: session log disabled: {}", e);
        }
        if !keep_going {
            break;
        }
    }

    let discarded = session.controller().len();
    writeln!(
        printer.out,
        "Goodbye! {} {} discarded.",
        discarded,
        if discarded == 1 { "task" } else { "tasks" }
    )?;
    printer.out.flush()
}

/// Execute one command. Returns false when the loop should stop.
fn execute<R: RngCore, W: Write>(
    session: &mut Session<R>,
    command: LineCommand,
    printer: &mut Printer<'_, W>,
) -> io::Result<bool> {
    match command {
        LineCommand::Empty => {}
        LineCommand::Add(text) => {
            if let Some(text) = text {
                session.dispatch(Intent::SetDraft(text));
            }
            // Blank submissions are dropped without comment.
            if let Outcome::Added(_) = session.dispatch(Intent::Add) {
                printer.list(session)?;
            }
        }
        LineCommand::Draft(text) => {
            session.dispatch(Intent::SetDraft(text));
        }
        LineCommand::Toggle(row) => match row_id(session, row) {
            Some(id) => {
                session.dispatch(Intent::Toggle(id));
                printer.list(session)?;
            }
            None => printer.no_row(row)?,
        },
        LineCommand::Delete(row) => match row_id(session, row) {
            Some(id) => {
                let was_open = session.controller().selected_task_id() == Some(id);
                session.dispatch(Intent::Delete(id));
                if was_open {
                    printer.note("Details closed.")?;
                }
                printer.list(session)?;
            }
            None => printer.no_row(row)?,
        },
        LineCommand::Show(row) => match row_id(session, row) {
            Some(id) => {
                session.dispatch(Intent::Select(id));
                if let Some(task) = session.controller().selected_task() {
                    printer.details(task)?;
                }
            }
            None => printer.no_row(row)?,
        },
        LineCommand::Close => {
            if session.controller().detail().is_open() {
                session.dispatch(Intent::CloseDetails);
                printer.note("Details closed.")?;
            }
        }
        LineCommand::List => printer.list(session)?,
        LineCommand::Help => writeln!(printer.out, "{}", HELP)?,
        LineCommand::Quit => return Ok(false),
        LineCommand::Invalid(msg) => printer.warn(&msg)?,
    }
    Ok(true)
}

fn row_id<R: RngCore>(session: &Session<R>, row: usize) -> Option<TaskId> {
    session
        .controller()
        .tasks()
        .get(row.checked_sub(1)?)
        .map(|t| t.id())
}

struct Printer<'a, W> {
    out: &'a mut W,
    title: &'a str,
    use_color: bool,
}

impl<W: Write> Printer<'_, W> {
    fn list<R: RngCore>(&mut self, session: &Session<R>) -> io::Result<()> {
        let controller = session.controller();
        let count = controller.len();
        let heading = format!(
            "{} ({} {})",
            self.title,
            count,
            if count == 1 { "Task" } else { "Tasks" }
        );
        let heading = self.paint(&heading, color::label);
        writeln!(self.out, "{}", heading)?;

        if controller.is_empty() {
            writeln!(self.out, "  Your task list is empty")?;
            writeln!(self.out, "  Add a new task to get started")?;
            return Ok(());
        }

        for (idx, task) in controller.tasks().iter().enumerate() {
            let line = self.row(idx + 1, task);
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn row(&self, number: usize, task: &Task) -> String {
        let check = if task.is_completed() { "[x]" } else { "[ ]" };
        if !self.use_color {
            return format!(
                "  {:>2}. {} {} ({})",
                number,
                check,
                task.text(),
                task.priority()
            );
        }
        let text = if task.is_completed() {
            color::completed_text(task.text())
        } else {
            task.text().to_string()
        };
        format!(
            "  {:>2}. {} {} {} ({})",
            number,
            color::status_dot(task),
            check,
            text,
            color::priority(task.priority().label(), task.priority())
        )
    }

    fn details(&mut self, task: &Task) -> io::Result<()> {
        let title = self.paint("Task Details", color::label);
        writeln!(self.out, "{}", title)?;
        let text = if self.use_color {
            color::priority(task.text(), task.priority())
        } else {
            task.text().to_string()
        };
        writeln!(self.out, "  {}", text)?;
        writeln!(self.out, "  Created:  {}", task.created_display())?;
        let status = if self.use_color && task.is_completed() {
            color::success(task.status_label())
        } else {
            task.status_label().to_string()
        };
        writeln!(self.out, "  Status:   {}", status)?;
        let priority = if self.use_color {
            color::priority(task.priority().label(), task.priority())
        } else {
            task.priority().label().to_string()
        };
        writeln!(self.out, "  Priority: {}", priority)
    }

    fn note(&mut self, msg: &str) -> io::Result<()> {
        let msg = self.paint(msg, color::info);
        writeln!(self.out, "{}", msg)
    }

    fn warn(&mut self, msg: &str) -> io::Result<()> {
        let msg = self.paint(msg, color::warning);
        writeln!(self.out, "{}", msg)
    }

    fn no_row(&mut self, row: usize) -> io::Result<()> {
        let msg = format!("No task at row {}.", row);
        let msg = self.paint(&msg, color::error);
        writeln!(self.out, "{}", msg)
    }

    fn paint(&self, text: &str, style: fn(&str) -> String) -> String {
        if self.use_color {
            style(text)
        } else {
            text.to_string()
        }
    }
}
