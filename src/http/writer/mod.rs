pub mod standard;
pub mod types;

pub use standard::{write_response, write_response_head, HttpWriter};
pub use types::WriterError;
