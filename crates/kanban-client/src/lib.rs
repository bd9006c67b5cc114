pub mod api;
pub mod http;

pub use api::BoardApi;
pub use http::{error_message, HttpBoardApi, RequestOptions};
