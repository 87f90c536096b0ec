use bytes::Bytes;

use crate::{
    commands::{command_error::CommandError, command_utils::wrong_arity},
    resp::RespValue,
};

/// Handles the ECHO command.
///
/// Returns the exact bytes provided as the single argument.
///
/// # Examples
///
/// ```text
/// ECHO "hello world"
/// => "$11\r\nhello world\r\n"
/// ```
pub fn echo(arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("echo"));
    }

    Ok(RespValue::BulkString(arguments[0].clone()))
}
