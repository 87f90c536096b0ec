use bytes::Bytes;

use crate::{
    commands::{command_error::CommandError, command_utils::wrong_arity},
    key_value_store::KeyValueStore,
    resp::RespValue,
};

pub fn llen(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("llen"));
    }

    Ok(RespValue::Integer(store.llen(&arguments[0])? as i64))
}
