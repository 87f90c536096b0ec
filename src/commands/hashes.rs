//! HSET, HGET, HGETALL, HLEN and HDEL.

use bytes::Bytes;

use crate::{
    commands::{command_error::CommandError, command_utils::wrong_arity},
    key_value_store::KeyValueStore,
    resp::RespValue,
};

pub struct HsetArguments {
    key: Bytes,
    pairs: Vec<(Bytes, Bytes)>,
}

impl HsetArguments {
    /// Parses `key field value [field value ...]`. Every pair is checked
    /// before anything is written.
    pub fn parse(arguments: &[Bytes]) -> Result<Self, CommandError> {
        if arguments.len() < 3 || arguments.len() % 2 == 0 {
            return Err(wrong_arity("hset"));
        }

        let pairs = arguments[1..]
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();

        Ok(Self {
            key: arguments[0].clone(),
            pairs,
        })
    }
}

/// Answers with the number of fields created; overwritten fields do not count.
pub fn hset(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    let hset_arguments = HsetArguments::parse(arguments)?;

    let created = store.hset(&hset_arguments.key, hset_arguments.pairs)?;

    Ok(RespValue::Integer(created as i64))
}

pub fn hget(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 2 {
        return Err(wrong_arity("hget"));
    }

    match store.hget(&arguments[0], &arguments[1])? {
        Some(value) => Ok(RespValue::BulkString(value)),
        None => Ok(RespValue::Null),
    }
}

/// Fields and values interleaved, ordered by field name.
pub fn hgetall(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("hgetall"));
    }

    let entries = store.hgetall(&arguments[0])?;

    Ok(RespValue::bulk_array(
        entries
            .into_iter()
            .flat_map(|(field, value)| [field, value]),
    ))
}

pub fn hlen(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("hlen"));
    }

    Ok(RespValue::Integer(store.hlen(&arguments[0])? as i64))
}

pub fn hdel(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() < 2 {
        return Err(wrong_arity("hdel"));
    }

    let removed = store.hdel(&arguments[0], &arguments[1..])?;

    Ok(RespValue::Integer(removed as i64))
}
