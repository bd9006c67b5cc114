use crate::cli::ShowArgs;
use crate::context::CliContext;
use crate::output;
use kanban_app::ViewState;

pub async fn handle(ctx: &CliContext, args: ShowArgs) -> anyhow::Result<()> {
    ctx.open(args.board).await?;
    let view = ctx.reconciler.render();

    if args.json {
        return output::output_success(serde_json::json!({
            "state": ctx.reconciler.view_state(),
            "board": view,
        }));
    }

    match ctx.reconciler.view_state() {
        ViewState::Empty => {
            println!("No boards yet. Create one with `kanban board create --name <NAME>`.");
        }
        _ => {
            for option in &view.board_options {
                let marker = if option.selected { '*' } else { ' ' };
                println!("{} {} {}", marker, option.id, option.name);
            }
            println!();
            print!("{}", view);
        }
    }
    Ok(())
}
