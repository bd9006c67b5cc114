use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use anyhow::anyhow;
use kanban_domain::{BoardInput, Editable};

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::List => {
            ctx.open(None).await?;
            output::output_list(ctx.reconciler.render().board_options)?;
        }
        BoardAction::Create { name, description } => {
            let board = ctx
                .reconciler
                .create_board(BoardInput::new(name, description))
                .await?;
            output::output_success(&board)?;
        }
        BoardAction::Update {
            id,
            name,
            description,
        } => {
            ctx.open(None).await?;
            let mut input = ctx
                .reconciler
                .read(|store| store.board_in_list(id).map(BoardInput::from_entity))
                .ok_or_else(|| anyhow!("Board {} not found", id))?;
            if let Some(name) = name {
                input.name = name;
            }
            if description.is_some() {
                input.description = description;
            }
            let board = ctx.reconciler.update_board(id, input).await?;
            output::output_success(&board)?;
        }
    }
    Ok(())
}
