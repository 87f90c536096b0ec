//! Reading RESP requests off a byte stream.
//!
//! Bytes are accumulated in a per-connection [`BytesMut`] so that a request
//! split across several TCP reads, or several requests pipelined into one
//! read, are both handled by the incremental decoder in [`crate::resp`].

use bytes::BytesMut;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::resp::{RespError, RespValue};

/// Errors that can occur while reading requests from a network stream.
#[derive(Error, Debug, PartialEq)]
pub enum CommandReadError {
    #[error("I/O error: {0}")]
    IoError(String),
    #[error("Connection closed")]
    ConnectionClosed,
    #[error("RESP parse error: {0}")]
    RespParseError(#[from] RespError),
}

/// Reads the next complete RESP value from `stream`.
///
/// Any bytes that follow the value stay in `buffer` for the next call. The
/// same holds after a protocol error: only the malformed input is dropped.
/// Reaching end of stream, even in the middle of a value, is reported as
/// [`CommandReadError::ConnectionClosed`].
pub async fn read_resp_value<R>(
    stream: &mut R,
    buffer: &mut BytesMut,
) -> Result<RespValue, CommandReadError>
where
    R: AsyncRead + Unpin,
{
    loop {
        if let Some(value) = RespValue::decode(buffer)? {
            return Ok(value);
        }

        let bytes_read = stream
            .read_buf(buffer)
            .await
            .map_err(|e| CommandReadError::IoError(e.to_string()))?;

        if bytes_read == 0 {
            return Err(CommandReadError::ConnectionClosed);
        }
    }
}
