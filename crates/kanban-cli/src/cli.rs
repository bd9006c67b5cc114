use clap::{Args, Parser, Subcommand};
use kanban_domain::{BoardId, ColumnId, TaskId};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")");

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Client for a remote kanban board service", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Base URL of the board API (or set KANBAN_API_URL)
    #[arg(long, global = true, value_name = "URL", env = "KANBAN_API_URL")]
    pub api_url: Option<String>,

    /// File remembering the selected board (or set KANBAN_STATE_FILE)
    #[arg(long, global = true, value_name = "FILE", env = "KANBAN_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the selected board
    Show(ShowArgs),
    /// Board operations
    Board(BoardCommand),
    /// Task operations
    Task(TaskCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Whether destructive actions may skip the confirmation prompt.
    pub fn assume_yes(&self) -> bool {
        matches!(
            self,
            Commands::Task(TaskCommand {
                action: TaskAction::Delete { yes: true, .. }
            })
        )
    }
}

#[derive(Args)]
pub struct ShowArgs {
    /// Board to show instead of the remembered one
    #[arg(long)]
    pub board: Option<BoardId>,
    /// Print the view tree as JSON
    #[arg(long)]
    pub json: bool,
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// List all boards
    List,
    /// Create a board and select it
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Rename or describe a board
    Update {
        #[arg(long)]
        id: BoardId,
        #[arg(long)]
        name: Option<String>,
        /// New description; pass an empty string to clear it
        #[arg(long)]
        description: Option<String>,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task in a column of the selected board
    Create(TaskCreateArgs),
    /// Edit a task on the selected board
    Update(TaskUpdateArgs),
    /// Delete a task
    Delete {
        #[arg(long)]
        id: TaskId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Drop a task at the end of another column
    Move {
        #[arg(long)]
        id: TaskId,
        #[arg(long)]
        column_id: ColumnId,
        #[arg(long)]
        board: Option<BoardId>,
    },
}

#[derive(Args)]
pub struct TaskCreateArgs {
    #[arg(long)]
    pub column_id: ColumnId,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub board: Option<BoardId>,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub id: TaskId,
    #[arg(long)]
    pub title: Option<String>,
    /// New description; pass an empty string to clear it
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub column_id: Option<ColumnId>,
    #[arg(long)]
    pub board: Option<BoardId>,
}
