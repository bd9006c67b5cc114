use crate::cli::Cli;
use kanban_app::{AlwaysConfirm, Confirm, ConfirmFn, Reconciler};
use kanban_client::HttpBoardApi;
use kanban_core::{AppConfig, KanbanResult};
use kanban_domain::BoardId;
use kanban_persistence::JsonSelectionStore;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

pub struct CliContext {
    pub reconciler: Reconciler,
}

impl CliContext {
    pub fn new(cli: &Cli, assume_yes: bool) -> KanbanResult<Self> {
        let mut config = AppConfig::load();
        if let Some(ref url) = cli.api_url {
            config.api_url = url.clone();
        }
        if let Some(ref path) = cli.state_file {
            config.state_file = Some(path.clone());
        }
        tracing::debug!(api_url = config.effective_api_url(), "using board service");

        let api = HttpBoardApi::from_config(&config)?;
        let selection = JsonSelectionStore::new(config.effective_state_file());
        let confirm: Arc<dyn Confirm> = if assume_yes {
            Arc::new(AlwaysConfirm)
        } else {
            Arc::new(ConfirmFn(prompt_stdin))
        };

        Ok(Self {
            reconciler: Reconciler::new(Arc::new(api), Arc::new(selection)).with_confirm(confirm),
        })
    }

    /// Loads the board list, then `board` when given, else the remembered one.
    pub async fn open(&self, board: Option<BoardId>) -> KanbanResult<Option<BoardId>> {
        match board {
            Some(id) => {
                self.reconciler.refresh_boards().await?;
                self.reconciler.select_board(Some(id)).await?;
                Ok(Some(id))
            }
            None => self.reconciler.load_boards().await,
        }
    }
}

fn prompt_stdin(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
