use std::time::Duration;

use bytes::Bytes;

use crate::{
    commands::{
        command_error::CommandError,
        command_utils::{is_option, parse_integer, wrong_arity},
    },
    key_value_store::KeyValueStore,
    resp::RespValue,
};

/// Represents the parsed arguments for the SET command
#[derive(Debug, PartialEq)]
pub struct SetArguments {
    /// The key to write
    key: Bytes,
    /// The value to be stored under the given key
    value: Bytes,
    /// Time to live requested with `EX` or `PX`
    ttl: Option<Duration>,
}

impl SetArguments {
    /// Parses `key value [EX seconds | PX milliseconds]`.
    ///
    /// # Returns
    ///
    /// * `Ok(SetArguments)` - Successfully parsed arguments
    /// * `Err(CommandError::WrongNumberOfArguments)` - If there are fewer than 2 arguments
    /// * `Err(CommandError::SyntaxError)` - If the option is unknown or incomplete
    /// * `Err(CommandError::InvalidInteger)` - If the expiration is not an integer
    /// * `Err(CommandError::InvalidExpireTime)` - If the expiration is not positive
    pub fn parse(arguments: &[Bytes]) -> Result<Self, CommandError> {
        if arguments.len() < 2 {
            return Err(wrong_arity("set"));
        }

        let ttl = match &arguments[2..] {
            [] => None,
            [option, amount] => {
                let amount = parse_integer(amount)?;

                if amount <= 0 {
                    return Err(CommandError::InvalidExpireTime("set".to_string()));
                }

                if is_option(option, "EX") {
                    Some(Duration::from_secs(amount as u64))
                } else if is_option(option, "PX") {
                    Some(Duration::from_millis(amount as u64))
                } else {
                    return Err(CommandError::SyntaxError);
                }
            }
            _ => return Err(CommandError::SyntaxError),
        };

        Ok(Self {
            key: arguments[0].clone(),
            value: arguments[1].clone(),
            ttl,
        })
    }
}

/// Handles the SET command.
///
/// Stores a string under a key, replacing any value of any type and any
/// previous expiration. Always answers `+OK`.
pub fn set(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    let set_arguments = SetArguments::parse(arguments)?;

    store.set(set_arguments.key, set_arguments.value, set_arguments.ttl);

    Ok(RespValue::ok())
}
