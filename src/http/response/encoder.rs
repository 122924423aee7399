//! Payload encoding.
//!
//! Each encoder turns one payload shape into a body plus the content type
//! that goes with it. Only structured values can fail; text and raw bytes
//! always encode.

use std::io;

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;
use thiserror::Error;

use super::types::HttpContentType;

/// A response body together with its default content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub body: Bytes,
    pub content_type: HttpContentType,
}

/// Errors raised while encoding a structured value
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("failed to serialize JSON body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write JSON body: {0}")]
    Io(#[from] io::Error),
}

/// Writes structured values as JSON.
///
/// Implementations write UTF-8 into the supplied writer. Failures are
/// returned unchanged; the encoder never retries.
pub trait JsonSerializer {
    fn serialize<T, W>(&self, value: &T, writer: W) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
        W: io::Write;
}

/// [`JsonSerializer`] backed by `serde_json`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerdeJsonSerializer {
    pretty: bool,
}

impl SerdeJsonSerializer {
    /// Compact output, no whitespace between tokens
    pub const fn compact() -> Self {
        SerdeJsonSerializer { pretty: false }
    }

    /// Indented output
    pub const fn pretty() -> Self {
        SerdeJsonSerializer { pretty: true }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl JsonSerializer for SerdeJsonSerializer {
    fn serialize<T, W>(&self, value: &T, writer: W) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
        W: io::Write,
    {
        if self.pretty {
            serde_json::to_writer_pretty(writer, value)?;
        } else {
            serde_json::to_writer(writer, value)?;
        }

        Ok(())
    }
}

/// Serializer used when the caller does not supply one
pub const DEFAULT_SERIALIZER: SerdeJsonSerializer = SerdeJsonSerializer::compact();

/// Serializes `value` into a freshly allocated buffer as `application/json`
pub fn encode_json<T, S>(value: &T, serializer: &S) -> Result<Encoded, EncodingError>
where
    T: Serialize + ?Sized,
    S: JsonSerializer,
{
    let mut writer = BytesMut::new().writer();
    serializer.serialize(value, &mut writer)?;

    Ok(Encoded {
        body: writer.into_inner().freeze(),
        content_type: HttpContentType::Json,
    })
}

/// Encodes text as UTF-8 `text/plain`
pub fn encode_text(text: &str) -> Encoded {
    Encoded {
        body: Bytes::copy_from_slice(text.as_bytes()),
        content_type: HttpContentType::PlainText,
    }
}

/// Passes bytes through as `application/octet-stream`
pub fn encode_bytes(bytes: impl Into<Bytes>) -> Encoded {
    Encoded {
        body: bytes.into(),
        content_type: HttpContentType::OctetStream,
    }
}
