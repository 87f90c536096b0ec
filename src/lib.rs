//! A sharded, in-memory key-value server speaking RESP.
//!
//! The keyspace is split across a fixed number of shards. Each shard runs on
//! its own thread and exclusively owns its part of the data:
//!
//! - Strings (GET, SET, DEL, TYPE, EXPIRE, TTL)
//! - Lists (LPUSH, RPUSH, LPOP, RPOP, LLEN, LRANGE)
//! - Sets (SADD, SREM, SMEMBERS, SCARD)
//! - Hashes (HSET, HGET, HGETALL, HLEN, HDEL)
//! - Sorted sets (ZADD, ZRANGE, ZREM, ZCARD, ZSCORE)
//!
//! A client may be served by any shard. Commands for keys owned elsewhere are
//! forwarded over the owner's inbox and the reply is relayed back in order.

pub mod cluster;
pub mod commands;
pub mod connection;
pub mod forwarding;
pub mod input;
pub mod key_value_store;
pub mod resp;
pub mod router;
pub mod server;
pub mod shard;
pub mod sorted_set;
pub mod topology;
