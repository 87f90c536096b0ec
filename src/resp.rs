//! RESP (REdis Serialization Protocol) values and their wire encoding.
//!
//! Decoding is incremental: [`RespValue::decode`] looks at the front of a
//! buffer and either consumes exactly one complete value, reports that more
//! bytes are needed, or fails with a [`RespError`]. Encoding never fails.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";

/// Longest header line accepted while still waiting for its CRLF.
const MAX_LINE_LENGTH: usize = 64 * 1024;
const MAX_BULK_LENGTH: i64 = 512 * 1024 * 1024;
const MAX_ARRAY_LENGTH: i64 = 1024 * 1024;
const MAX_NESTING_DEPTH: usize = 32;

/// Malformed input detected by the decoder.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum RespError {
    #[error("unknown type marker '{0}'")]
    UnknownTypeMarker(char),
    #[error("invalid length prefix")]
    InvalidLength,
    #[error("invalid integer")]
    InvalidInteger,
    #[error("bulk string is not terminated by CRLF")]
    UnterminatedBulkString,
    #[error("line is longer than 64 KiB without CRLF")]
    LineTooLong,
    #[error("arrays nested too deeply")]
    NestingTooDeep,
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
}

/// A single RESP value, either decoded from a client or produced as a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    SimpleString(String),
    Error(String),
    Integer(i64),
    BulkString(Bytes),
    /// Null bulk string, `$-1`.
    Null,
    Array(Vec<RespValue>),
    /// Null array, `*-1`.
    NullArray,
    /// A score. Travels on the wire as a bulk string, see [`format_double`].
    Double(f64),
}

impl RespValue {
    pub fn ok() -> Self {
        RespValue::SimpleString("OK".to_string())
    }

    pub fn bulk(data: impl Into<Bytes>) -> Self {
        RespValue::BulkString(data.into())
    }

    /// Builds an array of bulk strings.
    pub fn bulk_array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Bytes>,
    {
        RespValue::Array(items.into_iter().map(RespValue::BulkString).collect())
    }

    /// Decodes one value from the front of `buffer`.
    ///
    /// Returns `Ok(None)` and leaves the buffer untouched when the value is
    /// not complete yet. On success the bytes of the value are consumed.
    ///
    /// On error the malformed input is consumed up to and including the line
    /// that broke it, so decoding can resume with whatever was pipelined
    /// behind it. An over-long line has no end yet and empties the buffer.
    pub fn decode(buffer: &mut BytesMut) -> Result<Option<RespValue>, RespError> {
        match parse_value(buffer, 0, 0) {
            Ok(Some((value, consumed))) => {
                buffer.advance(consumed);
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(Malformed { error, resume_at }) => {
                buffer.advance(resume_at.min(buffer.len()));
                Err(error)
            }
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buffer = BytesMut::new();
        self.encode_into(&mut buffer);
        buffer.freeze()
    }

    pub fn encode_into(&self, buffer: &mut BytesMut) {
        match self {
            RespValue::SimpleString(s) => put_line(buffer, b'+', s.as_bytes()),
            RespValue::Error(s) => put_line(buffer, b'-', s.as_bytes()),
            RespValue::Integer(n) => put_line(buffer, b':', n.to_string().as_bytes()),
            RespValue::BulkString(data) => put_bulk(buffer, data),
            RespValue::Null => buffer.put_slice(b"$-1\r\n"),
            RespValue::Double(score) => put_bulk(buffer, format_double(*score).as_bytes()),
            RespValue::Array(elements) => {
                put_line(buffer, b'*', elements.len().to_string().as_bytes());
                for element in elements {
                    element.encode_into(buffer);
                }
            }
            RespValue::NullArray => buffer.put_slice(b"*-1\r\n"),
        }
    }
}

/// Renders a score the way clients expect to read it back: integral values
/// without a fractional part, everything else in its shortest round-trip form.
/// Magnitudes of at least 1e17 or below 1e-4 use exponent notation with a
/// signed, two-digit exponent (`1e+300`, `1e-07`).
pub fn format_double(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();

    if magnitude != 0.0 && !(1e-4..1e17).contains(&magnitude) {
        return format_exponent(value);
    }

    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }

    format!("{}", value)
}

fn format_exponent(value: f64) -> String {
    let formatted = format!("{:e}", value);

    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

fn put_line(buffer: &mut BytesMut, marker: u8, content: &[u8]) {
    buffer.put_u8(marker);
    // Simple strings and errors cannot carry line breaks.
    for &byte in content {
        buffer.put_u8(if byte == b'\r' || byte == b'\n' { b' ' } else { byte });
    }
    buffer.put_slice(CRLF);
}

fn put_bulk(buffer: &mut BytesMut, data: &[u8]) {
    buffer.put_u8(b'$');
    buffer.put_slice(data.len().to_string().as_bytes());
    buffer.put_slice(CRLF);
    buffer.put_slice(data);
    buffer.put_slice(CRLF);
}

type Parsed = Option<(RespValue, usize)>;

/// A decoding failure plus the offset where the next value may start.
struct Malformed {
    error: RespError,
    resume_at: usize,
}

impl Malformed {
    fn at(error: RespError, resume_at: usize) -> Self {
        Self { error, resume_at }
    }
}

fn parse_value(src: &[u8], start: usize, depth: usize) -> Result<Parsed, Malformed> {
    let Some(&marker) = src.get(start) else {
        return Ok(None);
    };

    let Some((line, next)) = read_line(src, start + 1)? else {
        return Ok(None);
    };

    let on_line = |error| Malformed::at(error, next);

    match marker {
        b'+' => Ok(Some((RespValue::SimpleString(utf8(line).map_err(on_line)?), next))),
        b'-' => Ok(Some((RespValue::Error(utf8(line).map_err(on_line)?), next))),
        b':' => Ok(Some((RespValue::Integer(parse_integer(line).map_err(on_line)?), next))),
        b'$' => parse_bulk_string(src, line, next),
        b'*' => parse_array(src, line, next, depth),
        _ => Err(on_line(RespError::UnknownTypeMarker(char::from(marker)))),
    }
}

fn parse_bulk_string(src: &[u8], header: &[u8], start: usize) -> Result<Parsed, Malformed> {
    let Some(length) =
        parse_length(header, MAX_BULK_LENGTH).map_err(|e| Malformed::at(e, start))?
    else {
        return Ok(Some((RespValue::Null, start)));
    };

    let end = start + length;
    if src.len() < end + CRLF.len() {
        return Ok(None);
    }

    if &src[end..end + CRLF.len()] != CRLF {
        let resume_at = find_crlf(&src[end..])
            .map(|position| end + position + CRLF.len())
            .unwrap_or(src.len());
        return Err(Malformed::at(RespError::UnterminatedBulkString, resume_at));
    }

    Ok(Some((
        RespValue::BulkString(Bytes::copy_from_slice(&src[start..end])),
        end + CRLF.len(),
    )))
}

fn parse_array(src: &[u8], header: &[u8], start: usize, depth: usize) -> Result<Parsed, Malformed> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(Malformed::at(RespError::NestingTooDeep, start));
    }

    let Some(length) =
        parse_length(header, MAX_ARRAY_LENGTH).map_err(|e| Malformed::at(e, start))?
    else {
        return Ok(Some((RespValue::NullArray, start)));
    };

    let mut elements = Vec::with_capacity(length.min(64));
    let mut cursor = start;

    for _ in 0..length {
        let Some((element, next)) = parse_value(src, cursor, depth + 1)? else {
            return Ok(None);
        };
        elements.push(element);
        cursor = next;
    }

    Ok(Some((RespValue::Array(elements), cursor)))
}

fn read_line(src: &[u8], start: usize) -> Result<Option<(&[u8], usize)>, Malformed> {
    let rest = src.get(start..).unwrap_or_default();

    match find_crlf(rest) {
        Some(end) => Ok(Some((&rest[..end], start + end + CRLF.len()))),
        None if rest.len() > MAX_LINE_LENGTH => {
            Err(Malformed::at(RespError::LineTooLong, src.len()))
        }
        None => Ok(None),
    }
}

fn find_crlf(src: &[u8]) -> Option<usize> {
    src.windows(CRLF.len()).position(|window| window == CRLF)
}

/// Parses a length header. `-1` is the null marker and maps to `None`.
fn parse_length(line: &[u8], max: i64) -> Result<Option<usize>, RespError> {
    let length = parse_integer(line).map_err(|_| RespError::InvalidLength)?;

    match length {
        -1 => Ok(None),
        n if n < 0 || n > max => Err(RespError::InvalidLength),
        n => Ok(Some(n as usize)),
    }
}

fn parse_integer(line: &[u8]) -> Result<i64, RespError> {
    std::str::from_utf8(line)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or(RespError::InvalidInteger)
}

fn utf8(line: &[u8]) -> Result<String, RespError> {
    String::from_utf8(line.to_vec()).map_err(|_| RespError::InvalidUtf8)
}
