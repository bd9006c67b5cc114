pub mod confirm;
pub mod handlers;
pub mod notification;
pub mod render;
pub mod state;

pub use confirm::{AlwaysConfirm, Confirm, ConfirmFn};
pub use handlers::drag_drop::{DragController, DragState, DropTarget, MoveIntent};
pub use notification::{
    Notification, NotificationKind, Notifier, HISTORY_LIMIT, NOTIFICATION_TIMEOUT,
};
pub use render::{render, Action, BoardOption, BoardView, ColumnView, HeaderView, TaskCardView};
pub use state::{choose_board, Reconciler, ViewState};
