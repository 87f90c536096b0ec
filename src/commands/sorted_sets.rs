//! ZADD, ZRANGE, ZREM, ZCARD and ZSCORE.

use bytes::Bytes;

use crate::{
    commands::{
        command_error::CommandError,
        command_utils::{is_option, parse_integer, parse_score, wrong_arity},
    },
    key_value_store::KeyValueStore,
    resp::RespValue,
};

#[derive(Debug, PartialEq)]
pub struct ZaddArguments {
    key: Bytes,
    entries: Vec<(f64, Bytes)>,
}

impl ZaddArguments {
    /// Parses `key score member [score member ...]`.
    ///
    /// All scores are validated before the store is touched, so a bad score
    /// anywhere in the list leaves the sorted set unchanged.
    pub fn parse(arguments: &[Bytes]) -> Result<Self, CommandError> {
        if arguments.len() < 3 {
            return Err(wrong_arity("zadd"));
        }

        if arguments.len() % 2 == 0 {
            return Err(CommandError::SyntaxError);
        }

        let entries = arguments[1..]
            .chunks_exact(2)
            .map(|pair| Ok((parse_score(&pair[0])?, pair[1].clone())))
            .collect::<Result<Vec<_>, CommandError>>()?;

        Ok(Self {
            key: arguments[0].clone(),
            entries,
        })
    }
}

/// Answers with the number of members added. Members that already existed
/// get their score updated but are not counted.
pub fn zadd(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    let zadd_arguments = ZaddArguments::parse(arguments)?;

    let added = store.zadd(&zadd_arguments.key, zadd_arguments.entries)?;

    Ok(RespValue::Integer(added as i64))
}

pub struct ZrangeArguments {
    key: Bytes,
    start_index: i64,
    end_index: i64,
    with_scores: bool,
}

impl ZrangeArguments {
    pub fn parse(arguments: &[Bytes]) -> Result<Self, CommandError> {
        if arguments.len() < 3 {
            return Err(wrong_arity("zrange"));
        }

        let with_scores = match &arguments[3..] {
            [] => false,
            [option] if is_option(option, "WITHSCORES") => true,
            _ => return Err(CommandError::SyntaxError),
        };

        Ok(Self {
            key: arguments[0].clone(),
            start_index: parse_integer(&arguments[1])?,
            end_index: parse_integer(&arguments[2])?,
            with_scores,
        })
    }
}

/// Handles the ZRANGE command.
///
/// Returns members by rank, lowest score first and ties in member order.
/// Indexes follow the same rules as LRANGE. With `WITHSCORES` each member is
/// followed by its score.
///
/// # Examples
///
/// ```text
/// ZADD board 10 m1 20 m2
/// ZRANGE board 0 -1 WITHSCORES
/// => ["m1", "10", "m2", "20"]
/// ```
pub fn zrange(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    let zrange_arguments = ZrangeArguments::parse(arguments)?;

    let members = store.zrange(
        &zrange_arguments.key,
        zrange_arguments.start_index,
        zrange_arguments.end_index,
    )?;

    let mut reply = Vec::with_capacity(members.len() * 2);
    for (member, score) in members {
        reply.push(RespValue::BulkString(member));
        if zrange_arguments.with_scores {
            reply.push(RespValue::Double(score));
        }
    }

    Ok(RespValue::Array(reply))
}

pub fn zrem(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() < 2 {
        return Err(wrong_arity("zrem"));
    }

    let removed = store.zrem(&arguments[0], &arguments[1..])?;

    Ok(RespValue::Integer(removed as i64))
}

pub fn zcard(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(wrong_arity("zcard"));
    }

    Ok(RespValue::Integer(store.zcard(&arguments[0])? as i64))
}

pub fn zscore(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    if arguments.len() != 2 {
        return Err(wrong_arity("zscore"));
    }

    match store.zscore(&arguments[0], &arguments[1])? {
        Some(score) => Ok(RespValue::Double(score)),
        None => Ok(RespValue::Null),
    }
}
