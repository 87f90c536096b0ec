use bytes::Bytes;

use crate::{
    commands::{
        command_error::CommandError,
        command_utils::{parse_integer, wrong_arity},
    },
    key_value_store::KeyValueStore,
    resp::RespValue,
};

/// Represents the parsed arguments for the LRANGE command.
pub struct LrangeArguments {
    /// The list to read
    key: Bytes,
    /// The starting index (can be negative to count from the end)
    start_index: i64,
    /// The inclusive ending index (can be negative to count from the end)
    end_index: i64,
}

impl LrangeArguments {
    /// Parses `key start stop`.
    ///
    /// # Returns
    ///
    /// * `Ok(LrangeArguments)` - If the arguments are valid
    /// * `Err(CommandError::WrongNumberOfArguments)` - If there are not exactly 3 arguments
    /// * `Err(CommandError::InvalidInteger)` - If start or end index is not an integer
    pub fn parse(arguments: &[Bytes]) -> Result<Self, CommandError> {
        if arguments.len() != 3 {
            return Err(wrong_arity("lrange"));
        }

        Ok(Self {
            key: arguments[0].clone(),
            start_index: parse_integer(&arguments[1])?,
            end_index: parse_integer(&arguments[2])?,
        })
    }
}

/// Handles the LRANGE command.
///
/// Returns the inclusive slice `start..=stop` of the list. Negative indexes
/// count from the tail, out-of-range indexes are clamped, and an empty
/// selection or a missing key yields an empty array.
///
/// # Examples
///
/// ```text
/// LRANGE mylist 0 2    (first 3 elements)
/// LRANGE mylist -2 -1  (last 2 elements)
/// ```
pub fn lrange(store: &mut KeyValueStore, arguments: &[Bytes]) -> Result<RespValue, CommandError> {
    let lrange_arguments = LrangeArguments::parse(arguments)?;

    let range = store.lrange(
        &lrange_arguments.key,
        lrange_arguments.start_index,
        lrange_arguments.end_index,
    )?;

    Ok(RespValue::bulk_array(range))
}
