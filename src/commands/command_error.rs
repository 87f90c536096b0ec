use thiserror::Error;

use crate::{forwarding::ForwardError, key_value_store::StoreError, resp::RespError, resp::RespValue};

#[derive(Error, Debug, PartialEq, Clone)]
pub enum CommandError {
    #[error("invalid command")]
    InvalidCommand,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("wrong number of arguments for '{0}' command")]
    WrongNumberOfArguments(String),
    #[error("value is not an integer or out of range")]
    InvalidInteger,
    #[error("value is not a valid float")]
    InvalidFloat,
    #[error("syntax error")]
    SyntaxError,
    #[error("invalid expire time in '{0}' command")]
    InvalidExpireTime(String),
    #[error(transparent)]
    TypeMismatch(#[from] StoreError),
    #[error("internal forwarding error: {0}")]
    Forwarding(#[from] ForwardError),
    #[error("Protocol error: {0}")]
    Protocol(#[from] RespError),
}

impl CommandError {
    /// The error reply sent back to the client.
    pub fn as_resp(&self) -> RespValue {
        match self {
            CommandError::InvalidCommand => RespValue::Error(
                "ERR Protocol error: expected a non-empty array of bulk strings".to_string(),
            ),
            CommandError::UnknownCommand(name) => {
                RespValue::Error(format!("ERR unknown command '{}'", name))
            }
            CommandError::WrongNumberOfArguments(name) => RespValue::Error(format!(
                "ERR wrong number of arguments for '{}' command",
                name
            )),
            CommandError::InvalidInteger => {
                RespValue::Error("ERR value is not an integer or out of range".to_string())
            }
            CommandError::InvalidFloat => {
                RespValue::Error("ERR value is not a valid float".to_string())
            }
            CommandError::SyntaxError => RespValue::Error("ERR syntax error".to_string()),
            CommandError::InvalidExpireTime(name) => {
                RespValue::Error(format!("ERR invalid expire time in '{}' command", name))
            }
            CommandError::TypeMismatch(e) => RespValue::Error(e.to_string()),
            CommandError::Forwarding(e) => {
                RespValue::Error(format!("ERR internal forwarding error: {}", e))
            }
            CommandError::Protocol(e) => RespValue::Error(format!("ERR Protocol error: {}", e)),
        }
    }
}
