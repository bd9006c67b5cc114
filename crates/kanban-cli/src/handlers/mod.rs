pub mod board;
pub mod show;
pub mod task;
