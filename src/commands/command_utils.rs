use bytes::Bytes;

use crate::commands::command_error::CommandError;

/// Parses a signed 64-bit integer argument.
pub fn parse_integer(argument: &[u8]) -> Result<i64, CommandError> {
    std::str::from_utf8(argument)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or(CommandError::InvalidInteger)
}

/// Parses a score. Infinities are accepted (`inf`, `+inf`, `-inf`), NaN is not.
pub fn parse_score(argument: &[u8]) -> Result<f64, CommandError> {
    std::str::from_utf8(argument)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|score| !score.is_nan())
        .ok_or(CommandError::InvalidFloat)
}

/// Case-insensitive comparison of an option argument such as `WITHSCORES`.
pub fn is_option(argument: &Bytes, option: &str) -> bool {
    argument.eq_ignore_ascii_case(option.as_bytes())
}

pub fn wrong_arity(command: &str) -> CommandError {
    CommandError::WrongNumberOfArguments(command.to_string())
}
