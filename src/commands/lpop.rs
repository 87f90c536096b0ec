use bytes::Bytes;

use crate::{
    commands::{
        command_error::CommandError,
        command_utils::{parse_integer, wrong_arity},
    },
    key_value_store::{KeyValueStore, ListEnd},
    resp::RespValue,
};

pub struct PopArguments {
    key: Bytes,
    count: Option<usize>,
}

impl PopArguments {
    pub fn parse(arguments: &[Bytes], end: ListEnd) -> Result<Self, CommandError> {
        if arguments.is_empty() || arguments.len() > 2 {
            return Err(match end {
                ListEnd::Head => wrong_arity("lpop"),
                ListEnd::Tail => wrong_arity("rpop"),
            });
        }

        let count = match arguments.get(1) {
            Some(count) => {
                let count = parse_integer(count)?;
                if count < 0 {
                    return Err(CommandError::InvalidInteger);
                }
                Some(count as usize)
            }
            None => None,
        };

        Ok(Self {
            key: arguments[0].clone(),
            count,
        })
    }
}

/// Handles the LPOP command.
///
/// Removes and returns elements from the head of a list. A list emptied this
/// way is deleted.
///
/// # Arguments
///
/// * `store` - The shard's key-value store
/// * `arguments` - Either `[key]` or `[key, count]`
///
/// # Returns
///
/// * Without a count: the popped element as a bulk string, or null if the key
///   does not exist
/// * With a count: an array of up to `count` elements, or a null array if
///   the key does not exist
///
/// # Examples
///
/// ```text
/// LPOP mylist      => "$3\r\none\r\n"
/// LPOP mylist 2    => "*2\r\n$3\r\ntwo\r\n$5\r\nthree\r\n"
/// LPOP missing     => "$-1\r\n"
/// LPOP missing 2   => "*-1\r\n"
/// ```
pub fn lpop(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    pop(store, arguments, ListEnd::Head)
}

/// Handles the RPOP command, the tail-side twin of [`lpop`].
pub fn rpop(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    pop(store, arguments, ListEnd::Tail)
}

fn pop(store: &mut KeyValueStore, arguments: &[Bytes], end: ListEnd) -> Result<RespValue, CommandError> {
    let pop_arguments = PopArguments::parse(arguments, end)?;

    match pop_arguments.count {
        None => match store.pop(&pop_arguments.key, end)? {
            Some(element) => Ok(RespValue::BulkString(element)),
            None => Ok(RespValue::Null),
        },
        Some(count) => match store.pop_many(&pop_arguments.key, end, count)? {
            Some(elements) => Ok(RespValue::bulk_array(elements)),
            None => Ok(RespValue::NullArray),
        },
    }
}
