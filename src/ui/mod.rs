// UI layer: the main menu loop and the terminal protocol it speaks.
// Menus and prompts go to stderr, results go to stdout, and one trimmed line
// is read from stdin per prompt.

pub mod actions;
pub mod delete;

use crate::api::GroupApi;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};
use std::time::Duration;
use tracing::debug;

pub const MAIN_MENU_LABEL: &str =
    "\n\n\n\n\n\n\n\n\n\n\n******** MAIN MENU ********\n\nWhat would you like to do?";

const MENU_OPTIONS: &str = "

\t1) create a random Okta Group with name 'Random Group {randomNumber}'
\t2) list all Okta Groups
\t3) delete an Okta Group (choose from list)

\ttype <exit> to exit the program

\t";

const MAKE_SELECTION: &str = "\n\nPlease enter a valid choice and press <Enter>";
pub const WRONG_CHOICE: &str = "\n\nSorry, but you didn't enter a valid choice!";

/// Line-oriented terminal. Generic over its streams so the menu can be
/// driven from a script in tests.
pub struct Console<R, O, E> {
    input: R,
    out: O,
    err: E,
}

impl Console<StdinLock<'static>, Stdout, Stderr> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, O: Write, E: Write> Console<R, O, E> {
    pub fn new(input: R, out: O, err: E) -> Self {
        Console { input, out, err }
    }

    /// Read one line, trimmed. `None` once the input is closed.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Menu text and prompts.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.err.write_all(text.as_bytes())?;
        self.err.flush()
    }

    /// Operation results.
    pub fn report(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

/// Behaviour switches for the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOptions {
    /// Ask y/n before deleting a group.
    pub confirm_delete: bool,
    /// Pause after an invalid choice in the delete prompt.
    pub retry_pause: Duration,
    /// Show a spinner on stderr while a remote call runs.
    pub show_progress: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        LoopOptions {
            confirm_delete: true,
            retry_pause: Duration::from_secs(2),
            show_progress: true,
        }
    }
}

/// One parsed main-menu input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    List,
    Delete,
    Exit,
    Invalid,
}

impl MenuChoice {
    /// Exact, case-sensitive match on already trimmed input.
    pub fn parse(input: &str) -> Self {
        match input {
            "1" => MenuChoice::Create,
            "2" => MenuChoice::List,
            "3" => MenuChoice::Delete,
            "exit" => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }
}

/// Main interactive menu. Runs until the operator types `exit` or stdin is
/// closed. Remote failures are reported and the menu keeps going; only a
/// terminal I/O failure ends the loop with an error.
pub fn main_menu<A, R, O, E>(
    api: &mut A,
    console: &mut Console<R, O, E>,
    rng: &mut StdRng,
    options: &LoopOptions,
) -> io::Result<()>
where
    A: GroupApi,
    R: BufRead,
    O: Write,
    E: Write,
{
    loop {
        console.prompt(&format!("{}{}{}", MAIN_MENU_LABEL, MENU_OPTIONS, MAKE_SELECTION))?;
        let choice = match console.read_line()? {
            Some(line) => MenuChoice::parse(&line),
            None => {
                debug!("input closed, leaving main menu");
                MenuChoice::Exit
            }
        };
        debug!(?choice, "menu selection");
        match choice {
            MenuChoice::Create => actions::create_random_group(api, console, rng, options)?,
            MenuChoice::List => actions::list_groups(api, console, options)?,
            MenuChoice::Delete => delete::delete_group_selector(api, console, options)?,
            MenuChoice::Exit => break,
            MenuChoice::Invalid => console.prompt(WRONG_CHOICE)?,
        }
    }
    Ok(())
}

/// Run a remote call behind an `indicatif` spinner.
pub(crate) fn with_spinner<T>(options: &LoopOptions, message: &'static str, call: impl FnOnce() -> T) -> T {
    let spinner = if options.show_progress {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    } else {
        ProgressBar::hidden()
    };
    let result = call();
    spinner.finish_and_clear();
    result
}
