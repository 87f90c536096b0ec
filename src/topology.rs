//! The immutable picture every shard shares: who owns which key and how to
//! reach each shard.

use std::time::Duration;

use crate::{router::ShardRouter, shard::ShardMailbox};

#[derive(Debug)]
pub struct Topology {
    router: ShardRouter,
    mailboxes: Vec<ShardMailbox>,
    forward_timeout: Duration,
}

impl Topology {
    /// `mailboxes[i]` must be the inbox of shard `i`.
    pub fn new(mailboxes: Vec<ShardMailbox>, forward_timeout: Duration) -> Self {
        Self {
            router: ShardRouter::new(mailboxes.len()),
            mailboxes,
            forward_timeout,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.mailboxes.len()
    }

    pub fn owner_of(&self, key: &[u8]) -> usize {
        self.router.owner_of(key)
    }

    pub fn mailbox(&self, shard: usize) -> Option<&ShardMailbox> {
        self.mailboxes.get(shard)
    }

    pub fn mailboxes(&self) -> &[ShardMailbox] {
        &self.mailboxes
    }

    /// Upper bound on a forwarded command, enqueueing included.
    pub fn forward_timeout(&self) -> Duration {
        self.forward_timeout
    }
}
