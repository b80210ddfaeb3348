pub mod helpers;
pub mod logger;
pub mod macros;

pub use helpers::{get_content_type, repeated_query};
pub use logger::init_tracing;
