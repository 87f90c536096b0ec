use bytes::Bytes;

use crate::{
    commands::{
        command_error::CommandError,
        echo::echo,
        get::get,
        hashes::{hdel, hget, hgetall, hlen, hset},
        keyspace::{del, expire, ttl},
        llen::llen,
        lpop::{lpop, rpop},
        lrange::lrange,
        ping::ping,
        rpush_and_lpush::{lpush, rpush},
        set::set,
        sets::{sadd, scard, smembers, srem},
        sorted_sets::{zadd, zcard, zrange, zrem, zscore},
        type_command::type_command,
    },
    key_value_store::KeyValueStore,
    resp::RespValue,
};

const SUPPORTED_COMMANDS: &[&str] = &[
    "PING", "ECHO", "GET", "SET", "DEL", "TYPE", "EXPIRE", "TTL", "LPUSH", "RPUSH", "LPOP",
    "RPOP", "LLEN", "LRANGE", "SADD", "SREM", "SMEMBERS", "SCARD", "HSET", "HGET", "HGETALL",
    "HLEN", "HDEL", "ZADD", "ZRANGE", "ZREM", "ZCARD", "ZSCORE",
];

/// A decoded request: the upper-cased command name and its raw arguments.
#[derive(Debug, PartialEq, Clone)]
pub struct CommandHandler {
    pub name: String,
    pub arguments: Vec<Bytes>,
}

impl CommandHandler {
    /// Builds a command from a request, which must be a non-empty array of
    /// bulk strings naming a supported command.
    pub fn new(input: RespValue) -> Result<Self, CommandError> {
        let RespValue::Array(elements) = input else {
            return Err(CommandError::InvalidCommand);
        };

        let mut parts = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                RespValue::BulkString(part) => parts.push(part),
                _ => return Err(CommandError::InvalidCommand),
            }
        }

        if parts.is_empty() {
            return Err(CommandError::InvalidCommand);
        }

        let raw_name = parts.remove(0);
        let name = String::from_utf8_lossy(&raw_name).to_uppercase();

        if !SUPPORTED_COMMANDS.contains(&name.as_str()) {
            return Err(CommandError::UnknownCommand(
                String::from_utf8_lossy(&raw_name).into_owned(),
            ));
        }

        Ok(Self {
            name,
            arguments: parts,
        })
    }

    /// The key that decides which shard runs this command. `None` for
    /// commands that run wherever they are received.
    pub fn key(&self) -> Option<&Bytes> {
        match self.name.as_str() {
            "PING" | "ECHO" => None,
            _ => self.arguments.first(),
        }
    }

    pub fn handle_command(&self, store: &mut KeyValueStore) -> Result<RespValue, CommandError> {
        let arguments = self.arguments.as_slice();

        match self.name.as_str() {
            "PING" => ping(arguments),
            "ECHO" => echo(arguments),
            "GET" => get(store, arguments),
            "SET" => set(store, arguments),
            "DEL" => del(store, arguments),
            "TYPE" => type_command(store, arguments),
            "EXPIRE" => expire(store, arguments),
            "TTL" => ttl(store, arguments),
            "LPUSH" => lpush(store, arguments),
            "RPUSH" => rpush(store, arguments),
            "LPOP" => lpop(store, arguments),
            "RPOP" => rpop(store, arguments),
            "LLEN" => llen(store, arguments),
            "LRANGE" => lrange(store, arguments),
            "SADD" => sadd(store, arguments),
            "SREM" => srem(store, arguments),
            "SMEMBERS" => smembers(store, arguments),
            "SCARD" => scard(store, arguments),
            "HSET" => hset(store, arguments),
            "HGET" => hget(store, arguments),
            "HGETALL" => hgetall(store, arguments),
            "HLEN" => hlen(store, arguments),
            "HDEL" => hdel(store, arguments),
            "ZADD" => zadd(store, arguments),
            "ZRANGE" => zrange(store, arguments),
            "ZREM" => zrem(store, arguments),
            "ZCARD" => zcard(store, arguments),
            "ZSCORE" => zscore(store, arguments),
            _ => Err(CommandError::UnknownCommand(self.name.to_lowercase())),
        }
    }

    /// Runs the command and turns any error into its error reply.
    pub fn execute(&self, store: &mut KeyValueStore) -> RespValue {
        self.handle_command(store)
            .unwrap_or_else(|e| e.as_resp())
    }
}
