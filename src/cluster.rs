//! Starting, addressing and stopping the set of shard threads.

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{ensure, Context};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::LocalSet;
use tracing::{info, warn};

use crate::{
    commands::CommandError,
    forwarding::ForwardError,
    resp::RespValue,
    shard::{self, Shard, ShardMailbox, ShardMessage},
    topology::Topology,
};

pub const DEFAULT_FORWARD_TIMEOUT: Duration = Duration::from_millis(1000);
pub const DEFAULT_INBOX_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    pub shards: usize,
    pub forward_timeout: Duration,
    pub inbox_capacity: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            shards: default_shard_count(),
            forward_timeout: DEFAULT_FORWARD_TIMEOUT,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

/// One shard per available core, or a single shard if that is unknown.
pub fn default_shard_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// A running set of shards.
///
/// Each shard runs on its own named OS thread with a current-thread Tokio
/// runtime. Dropping the cluster asks every shard to stop but does not wait,
/// and a shard whose inbox is full at that moment is not reached (a warning
/// is logged). [`Cluster::shutdown`] is the reliable way to stop: it waits
/// for inbox room and then for the threads.
#[derive(Debug)]
pub struct Cluster {
    topology: Arc<Topology>,
    threads: Vec<JoinHandle<()>>,
    next_shard: AtomicUsize,
}

impl Cluster {
    pub fn start(config: ClusterConfig) -> anyhow::Result<Self> {
        ensure!(config.shards >= 1, "a cluster needs at least one shard");
        ensure!(config.inbox_capacity >= 1, "shard inboxes need room for one message");

        let (mailboxes, inboxes): (Vec<_>, Vec<_>) = (0..config.shards)
            .map(|id| {
                let (sender, inbox) = mpsc::channel(config.inbox_capacity);
                (ShardMailbox::new(id, sender), inbox)
            })
            .unzip();

        let mut cluster = Self {
            topology: Arc::new(Topology::new(mailboxes, config.forward_timeout)),
            threads: Vec::with_capacity(config.shards),
            next_shard: AtomicUsize::new(0),
        };

        // On an early return the partially started cluster is dropped, which
        // stops the shards already running.
        for (id, inbox) in inboxes.into_iter().enumerate() {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .with_context(|| format!("failed to build runtime for shard {}", id))?;

            let topology = Arc::clone(&cluster.topology);
            let handle = thread::Builder::new()
                .name(format!("shard-{}", id))
                .spawn(move || {
                    let local = LocalSet::new();
                    let shard = Rc::new(Shard::new(id, topology));
                    local.block_on(&runtime, shard::run(shard, inbox));
                })
                .with_context(|| format!("failed to spawn thread for shard {}", id))?;

            cluster.threads.push(handle);
        }

        info!(
            shards = config.shards,
            forward_timeout_ms = config.forward_timeout.as_millis() as u64,
            inbox_capacity = config.inbox_capacity,
            "cluster started"
        );

        Ok(cluster)
    }

    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    pub fn shard_count(&self) -> usize {
        self.topology.shard_count()
    }

    /// A handle that submits requests as if they arrived on a connection
    /// owned by `shard_id`.
    pub fn session(&self, shard_id: usize) -> Option<Session> {
        self.topology
            .mailbox(shard_id)
            .cloned()
            .map(|mailbox| Session { mailbox })
    }

    /// Hands an accepted connection to the next shard in round-robin order
    /// and returns that shard's id.
    ///
    /// Waiting for room in the shard's inbox is bounded by the forward
    /// timeout. A connection that could not be handed over is closed.
    pub async fn assign_connection(&self, stream: std::net::TcpStream) -> Result<usize, ForwardError> {
        let shard_id = self.next_shard.fetch_add(1, Ordering::Relaxed) % self.shard_count();
        let timeout = self.topology.forward_timeout();

        let mailbox = self
            .topology
            .mailbox(shard_id)
            .ok_or(ForwardError::ShardUnavailable { shard: shard_id })?;

        tokio::time::timeout(timeout, mailbox.send(ShardMessage::Connection(stream)))
            .await
            .map_err(|_| ForwardError::Timeout {
                shard: shard_id,
                after: timeout,
            })?
            .map_err(|_| ForwardError::ShardUnavailable { shard: shard_id })?;

        Ok(shard_id)
    }

    /// Stops every shard and waits for its thread to finish. Connections
    /// still open on a shard are closed when it stops.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        for mailbox in self.topology.mailboxes() {
            // A shard that already stopped has nothing left to do.
            let _ = mailbox.send(ShardMessage::Shutdown).await;
        }

        let threads = std::mem::take(&mut self.threads);
        tokio::task::spawn_blocking(move || {
            for handle in threads {
                if handle.join().is_err() {
                    warn!("shard thread panicked");
                }
            }
        })
        .await
        .context("failed to join shard threads")?;

        info!("cluster stopped");
        Ok(())
    }
}

impl Drop for Cluster {
    fn drop(&mut self) {
        // Nothing left to stop once `shutdown` has joined the threads.
        if self.threads.is_empty() {
            return;
        }

        for mailbox in self.topology.mailboxes() {
            if let Err(TrySendError::Full(_)) = mailbox.try_send(ShardMessage::Shutdown) {
                warn!(
                    shard = mailbox.shard_id(),
                    "inbox full, shard not stopped; use Cluster::shutdown to wait for room"
                );
            }
        }
    }
}

/// In-process client bound to one shard.
///
/// Requests go through that shard exactly like a connection it serves:
/// decoded there, executed there or forwarded to the owner.
#[derive(Debug, Clone)]
pub struct Session {
    mailbox: ShardMailbox,
}

impl Session {
    pub fn shard_id(&self) -> usize {
        self.mailbox.shard_id()
    }

    pub async fn execute(&self, request: RespValue) -> RespValue {
        let shard = self.mailbox.shard_id();
        let (respond_to, reply) = oneshot::channel();

        if self
            .mailbox
            .send(ShardMessage::Submit {
                request,
                respond_to,
            })
            .await
            .is_err()
        {
            return CommandError::from(ForwardError::ShardUnavailable { shard }).as_resp();
        }

        match reply.await {
            Ok(reply) => reply,
            Err(_) => CommandError::from(ForwardError::ReplyDropped { shard }).as_resp(),
        }
    }
}
