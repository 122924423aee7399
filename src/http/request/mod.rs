pub mod errors;
pub mod parser;
pub mod types;

pub use errors::ParseError;
pub use parser::HttpRequest;
pub use types::{HttpMethod, HttpVersion};
