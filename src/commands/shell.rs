use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tracing::debug;

use kanban::Board;

use crate::commands::create::CreateArgs;
use crate::commands::update::EditArgs;
use crate::commands::{
    activity, board as board_view, comment, create, delete, export, favorite, filter, live, moves,
    notify, show, subtask, team, update,
};

#[derive(Parser, Debug)]
#[command(name = "kanban", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Print the board
    #[command(visible_alias = "ls")]
    Board,

    /// Show task details
    Show {
        /// Task ID
        id: i64,
    },

    /// Create a new task
    Create(CreateArgs),

    /// Edit a task
    Edit(EditArgs),

    /// Delete a task
    #[command(visible_alias = "rm")]
    Delete {
        /// Task ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Move a task to another column
    #[command(visible_alias = "mv")]
    Move {
        /// Task ID
        id: i64,
        /// Target column (todo, in-progress, review, done)
        status: String,
    },

    /// Pick up a task to drop on a column
    Drag {
        /// Task ID
        id: i64,
    },

    /// Drop the dragged task on a column
    Drop {
        /// Target column
        status: String,
    },

    /// Cancel the current drag
    Release,

    /// Star or unstar a task
    #[command(visible_alias = "star")]
    Favorite {
        /// Task ID
        id: i64,
    },

    /// Subtask management
    Subtask {
        #[command(subcommand)]
        action: SubtaskCommand,
    },

    /// Comment on a task
    Comment {
        /// Task ID
        id: i64,
        /// Comment text
        text: String,
        /// Comment as another member
        #[arg(long = "as")]
        author: Option<i64>,
    },

    /// Change the board filters
    Filter {
        #[command(subcommand)]
        action: FilterCommand,
    },

    /// List notifications
    Notifications {
        /// Include entries beyond the visible few
        #[arg(short, long)]
        all: bool,
    },

    /// Mark a notification as read
    Read {
        /// Notification ID
        id: i64,
    },

    /// Remove a notification
    Dismiss {
        /// Notification ID
        id: i64,
    },

    /// Show recent activity
    Activity {
        /// How many entries to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// List team members
    Team,

    /// Set a member's presence
    Presence {
        /// Member ID
        id: i64,
        /// online, away or offline
        status: String,
    },

    /// Run timers that have come due
    Tick,

    /// Export the board
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Format (json, markdown)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Leave the shell
    #[command(visible_alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum SubtaskCommand {
    /// Add a subtask
    Add {
        /// Task ID
        task: i64,
        /// Subtask title
        title: String,
    },
    /// Toggle a subtask between done and open
    Toggle {
        /// Task ID
        task: i64,
        /// Subtask ID
        subtask: i64,
    },
}

#[derive(Subcommand, Debug)]
enum FilterCommand {
    /// Set the search text (empty to clear)
    Search {
        #[arg(default_value = "")]
        text: String,
    },
    /// Toggle a priority filter
    Priority { priority: String },
    /// Toggle a column filter
    Status { status: String },
    /// Remove all filters
    Clear,
}

enum Flow {
    Continue,
    Quit,
}

pub fn run(board: &mut Board) -> Result<()> {
    println!("{}", board_view::render(board));
    println!("Type 'help' for commands, 'quit' to leave.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("kanban> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            println!();
            break;
        }
        if let Flow::Quit = handle_line(board, &line) {
            break;
        }
    }
    Ok(())
}

/// Runs one input line, printing output and errors. Never fails the session.
fn handle_line(board: &mut Board, line: &str) -> Flow {
    let Some(words) = shlex::split(line) else {
        eprintln!("Error: unbalanced quotes");
        return Flow::Continue;
    };
    if words.is_empty() {
        return Flow::Continue;
    }

    let parsed = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed,
        Err(e) => {
            // help and usage errors alike
            if let Err(io_err) = e.print() {
                debug!(error = %io_err, "failed to print usage");
            }
            return Flow::Continue;
        }
    };
    debug!(command = ?parsed.command, "shell command");

    live::pump(board)
        .into_iter()
        .for_each(|l| println!("{}", l));

    match execute(board, parsed.command) {
        Ok(flow) => {
            notify::announce(board);
            flow
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            board.drain_events();
            Flow::Continue
        }
    }
}

fn execute(board: &mut Board, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::Board => board_view::run(board)?,
        ShellCommand::Show { id } => show::run(board, id)?,
        ShellCommand::Create(args) => {
            create::run(board, &args)?;
        }
        ShellCommand::Edit(args) => update::run(board, &args)?,
        ShellCommand::Delete { id, force } => delete::run(board, id, force)?,
        ShellCommand::Move { id, status } => moves::run(board, id, &status)?,
        ShellCommand::Drag { id } => moves::drag(board, id)?,
        ShellCommand::Drop { status } => moves::drop_on(board, &status)?,
        ShellCommand::Release => moves::release(board)?,
        ShellCommand::Favorite { id } => favorite::run(board, id)?,
        ShellCommand::Subtask { action } => match action {
            SubtaskCommand::Add { task, title } => subtask::add(board, task, &title)?,
            SubtaskCommand::Toggle { task, subtask: id } => subtask::toggle(board, task, id)?,
        },
        ShellCommand::Comment { id, text, author } => comment::run(board, id, &text, author)?,
        ShellCommand::Filter { action } => match action {
            FilterCommand::Search { text } => filter::search(board, &text)?,
            FilterCommand::Priority { priority } => filter::toggle_priority(board, &priority)?,
            FilterCommand::Status { status } => filter::toggle_status(board, &status)?,
            FilterCommand::Clear => filter::clear(board)?,
        },
        ShellCommand::Notifications { all } => notify::list(board, all)?,
        ShellCommand::Read { id } => notify::read(board, id)?,
        ShellCommand::Dismiss { id } => notify::dismiss(board, id)?,
        ShellCommand::Activity { limit } => activity::run(board, limit)?,
        ShellCommand::Team => team::run(board)?,
        ShellCommand::Presence { id, status } => team::set_presence(board, id, &status)?,
        ShellCommand::Tick => match board.next_timer_due() {
            Some(at) => println!("Next timer due {}", at.format("%H:%M:%S%.3f")),
            None => println!("No timers pending"),
        },
        ShellCommand::Export { output, format } => match format.as_str() {
            "json" => export::run_json(board, output.as_deref())?,
            "markdown" | "md" => export::run_markdown(board, output.as_deref())?,
            _ => bail!("Unknown format '{}'. Use 'json' or 'markdown'", format),
        },
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
