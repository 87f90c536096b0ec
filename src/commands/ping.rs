use bytes::Bytes;

use crate::{
    commands::{command_error::CommandError, command_utils::wrong_arity},
    resp::RespValue,
};

pub struct PingArguments {
    message: Option<Bytes>,
}

impl PingArguments {
    pub fn parse(arguments: &[Bytes]) -> Result<Self, CommandError> {
        if arguments.len() > 1 {
            return Err(wrong_arity("ping"));
        }

        Ok(Self {
            message: arguments.first().cloned(),
        })
    }
}

/// Handles the PING command.
///
/// Answers `+PONG`, or echoes the optional message back as a bulk string.
pub fn ping(arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    let ping_arguments = PingArguments::parse(arguments)?;

    match ping_arguments.message {
        Some(message) => Ok(RespValue::BulkString(message)),
        None => Ok(RespValue::SimpleString("PONG".to_string())),
    }
}
