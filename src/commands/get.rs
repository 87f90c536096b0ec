use bytes::Bytes;

use crate::{
    commands::{command_error::CommandError, command_utils::wrong_arity},
    key_value_store::KeyValueStore,
    resp::RespValue,
};

/// Handles the GET command.
///
/// Retrieves the string stored at a key. Expired keys are dropped on the way
/// and read as absent.
///
/// # Returns
///
/// * `Ok(RespValue::BulkString)` - The stored value
/// * `Ok(RespValue::Null)` - If the key does not exist
/// * `Err(CommandError::TypeMismatch)` - If the key holds a collection
/// * `Err(CommandError::WrongNumberOfArguments)` - If there is not exactly one argument
pub fn get(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("get"));
    }

    match store.get(&arguments[0])? {
        Some(value) => Ok(RespValue::BulkString(value)),
        None => Ok(RespValue::Null),
    }
}
