mod command_error;
mod command_handler;
mod command_utils;
mod echo;
mod get;
mod hashes;
mod keyspace;
mod llen;
mod lpop;
mod lrange;
mod ping;
mod rpush_and_lpush;
mod set;
mod sets;
mod sorted_sets;
mod type_command;

pub use command_error::CommandError;
pub use command_handler::CommandHandler;
