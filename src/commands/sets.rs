//! SADD, SREM, SMEMBERS and SCARD.

use bytes::Bytes;

use crate::{
    commands::{command_error::CommandError, command_utils::wrong_arity},
    key_value_store::KeyValueStore,
    resp::RespValue,
};

/// Answers with the number of members that were not already in the set.
pub fn sadd(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() < 2 {
        return Err(wrong_arity("sadd"));
    }

    let added = store.sadd(&arguments[0], arguments[1..].to_vec())?;

    Ok(RespValue::Integer(added as i64))
}

pub fn srem(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() < 2 {
        return Err(wrong_arity("srem"));
    }

    let removed = store.srem(&arguments[0], &arguments[1..])?;

    Ok(RespValue::Integer(removed as i64))
}

/// Members come back in byte-lexicographic order.
pub fn smembers(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("smembers"));
    }

    Ok(RespValue::bulk_array(store.smembers(&arguments[0])?))
}

pub fn scard(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("scard"));
    }

    Ok(RespValue::Integer(store.scard(&arguments[0])? as i64))
}
