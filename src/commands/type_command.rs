use bytes::Bytes;

use crate::{
    commands::{command_error::CommandError, command_utils::wrong_arity},
    key_value_store::KeyValueStore,
    resp::RespValue,
};

pub fn type_command(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("type"));
    }

    Ok(RespValue::SimpleString(store.key_type(&arguments[0]).to_string()))
}
