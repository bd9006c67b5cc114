use crate::cli::{TaskAction, TaskCreateArgs, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;
use anyhow::anyhow;
use kanban_app::{DragController, DropTarget};
use kanban_domain::{BoardId, ColumnId, TaskId, TaskInput};

pub async fn handle(ctx: &CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Create(args) => handle_create(ctx, args).await,
        TaskAction::Update(args) => handle_update(ctx, args).await,
        TaskAction::Delete { id, .. } => {
            let deleted = ctx.reconciler.delete_task(id).await?;
            output::output_success(serde_json::json!({ "id": id, "deleted": deleted }))
        }
        TaskAction::Move {
            id,
            column_id,
            board,
        } => handle_move(ctx, id, column_id, board).await,
    }
}

async fn handle_create(ctx: &CliContext, args: TaskCreateArgs) -> anyhow::Result<()> {
    ctx.open(args.board).await?;
    let task = ctx
        .reconciler
        .create_task(TaskInput::new(args.title, args.description, args.column_id))
        .await?;
    output::output_success(&task)
}

async fn handle_update(ctx: &CliContext, args: TaskUpdateArgs) -> anyhow::Result<()> {
    ctx.open(args.board).await?;
    let mut input = ctx
        .reconciler
        .task_for_edit(args.id)
        .ok_or_else(|| anyhow!("Task {} is not on the selected board", args.id))?;
    let id = args.id;
    apply_edits(&mut input, args);
    let task = ctx.reconciler.update_task(id, input).await?;
    output::output_success(&task)
}

/// Flags left out keep the stored value; an empty `--description` clears it.
fn apply_edits(input: &mut TaskInput, args: TaskUpdateArgs) {
    if let Some(title) = args.title {
        input.title = title;
    }
    if args.description.is_some() {
        input.description = args.description;
    }
    if let Some(column_id) = args.column_id {
        input.column_id = column_id;
    }
}

/// Replays the move as a drag gesture so it gets the same append placement.
async fn handle_move(
    ctx: &CliContext,
    id: TaskId,
    column_id: ColumnId,
    board: Option<BoardId>,
) -> anyhow::Result<()> {
    ctx.open(board).await?;
    let target = DropTarget::Zone(column_id);

    let mut drag = DragController::new();
    drag.drag_start(id);
    drag.drag_enter(target);
    let moved = drag.drop_on(target, &ctx.reconciler).await;
    drag.drag_end();

    match moved? {
        Some(task) => output::output_success(&task),
        None => Err(anyhow!(
            "Column {} is not on the selected board",
            column_id
        )),
    }
}
