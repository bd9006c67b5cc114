pub mod drag_drop;
