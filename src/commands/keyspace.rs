//! Commands that act on a key regardless of the type it holds.

use bytes::Bytes;

use crate::{
    commands::{
        command_error::CommandError,
        command_utils::{parse_integer, wrong_arity},
    },
    key_value_store::{KeyValueStore, Ttl},
    resp::RespValue,
};

/// Handles the DEL command. Only one key per call, so the command always
/// lands on a single shard.
pub fn del(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("del"));
    }

    Ok(RespValue::Integer(store.del(&arguments[0]) as i64))
}

pub fn expire(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 2 {
        return Err(wrong_arity("expire"));
    }

    let seconds = parse_integer(&arguments[1])?;

    Ok(RespValue::Integer(store.expire(&arguments[0], seconds) as i64))
}

/// Handles the TTL command.
///
/// Answers `-2` for a missing key, `-1` for a key without a deadline, and
/// otherwise the remaining time rounded to the nearest second.
pub fn ttl(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("ttl"));
    }

    let seconds = match store.ttl(&arguments[0]) {
        Ttl::Missing => -2,
        Ttl::Persistent => -1,
        Ttl::Remaining(remaining) => ((remaining.as_millis() + 500) / 1000) as i64,
    };

    Ok(RespValue::Integer(seconds))
}
