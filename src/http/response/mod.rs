pub mod builder;
pub mod encoder;
pub mod headers;
pub mod types;

pub use builder::{assemble, EncodedResponse};
pub use encoder::{
    encode_bytes, encode_json, encode_text, Encoded, EncodingError, JsonSerializer,
    SerdeJsonSerializer, DEFAULT_SERIALIZER,
};
pub use headers::{merge_headers, HeaderSet, CONTENT_TYPE};
pub use types::{HttpContentType, HttpStatusCode};
