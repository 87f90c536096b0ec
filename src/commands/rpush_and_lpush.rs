use bytes::Bytes;

use crate::{
    commands::{command_error::CommandError, command_utils::wrong_arity},
    key_value_store::{KeyValueStore, ListEnd},
    resp::RespValue,
};

pub struct PushArrayOperations {
    key: Bytes,
    values: Vec<Bytes>,
}

impl PushArrayOperations {
    pub fn parse(arguments: &[Bytes], end: ListEnd) -> Result<Self, CommandError> {
        if arguments.len() < 2 {
            return Err(match end {
                ListEnd::Head => wrong_arity("lpush"),
                ListEnd::Tail => wrong_arity("rpush"),
            });
        }

        Ok(Self {
            key: arguments[0].clone(),
            values: arguments[1..].to_vec(),
        })
    }
}

/// Handles the RPUSH command: appends every value at the tail, creating the
/// list if needed, and answers with the new length.
pub fn rpush(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    push_array_operations(store, arguments, ListEnd::Tail)
}

/// Handles the LPUSH command. Values are inserted at the head one after the
/// other, so `LPUSH k a b c` leaves the list as `c b a`.
pub fn lpush(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    push_array_operations(store, arguments, ListEnd::Head)
}

fn push_array_operations(
    store: &mut KeyValueStore,
    arguments: &[Bytes],
    end: ListEnd,
) -> Result<RespValue, CommandError> {
    let push_array_arguments = PushArrayOperations::parse(arguments, end)?;

    let length = store.push(&push_array_arguments.key, push_array_arguments.values, end)?;

    Ok(RespValue::Integer(length as i64))
}
