//! A shard: one store, one inbox, one thread.
//!
//! Everything a shard owns lives on its own thread inside a `LocalSet`. The
//! store sits in a `RefCell` and is only ever borrowed for the duration of a
//! single command, never across an `.await`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::{
    commands::CommandHandler, connection::handle_connection, forwarding::Coordinator,
    key_value_store::KeyValueStore, resp::RespValue, topology::Topology,
};

/// Everything that can be delivered to a shard's inbox.
#[derive(Debug)]
pub enum ShardMessage {
    /// A command for a key this shard owns, sent by another shard.
    Forwarded {
        command: CommandHandler,
        respond_to: oneshot::Sender<RespValue>,
    },
    /// A raw request to run as if it came from a connection on this shard.
    Submit {
        request: RespValue,
        respond_to: oneshot::Sender<RespValue>,
    },
    /// A freshly accepted client connection to serve from now on.
    Connection(std::net::TcpStream),
    Shutdown,
}

/// Sending side of a shard's inbox.
#[derive(Debug, Clone)]
pub struct ShardMailbox {
    shard_id: usize,
    sender: mpsc::Sender<ShardMessage>,
}

impl ShardMailbox {
    pub fn new(shard_id: usize, sender: mpsc::Sender<ShardMessage>) -> Self {
        Self { shard_id, sender }
    }

    pub fn shard_id(&self) -> usize {
        self.shard_id
    }

    /// Waits for room in the inbox. Fails only once the shard has stopped,
    /// handing the message back.
    pub async fn send(&self, message: ShardMessage) -> Result<(), ShardMessage> {
        self.sender.send(message).await.map_err(|e| e.0)
    }

    pub fn try_send(&self, message: ShardMessage) -> Result<(), TrySendError<ShardMessage>> {
        self.sender.try_send(message)
    }
}

#[derive(Debug)]
pub struct Shard {
    id: usize,
    store: RefCell<KeyValueStore>,
    topology: Arc<Topology>,
}

impl Shard {
    pub fn new(id: usize, topology: Arc<Topology>) -> Self {
        Self {
            id,
            store: RefCell::new(KeyValueStore::new()),
            topology,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Runs `command` against this shard's store, to completion.
    pub fn execute_local(&self, command: &CommandHandler) -> RespValue {
        let mut store = self.store.borrow_mut();
        command.execute(&mut store)
    }
}

/// The shard's event loop. Must run inside a `LocalSet`, since connections
/// and submitted requests are spawned as local tasks next to it.
///
/// Forwarded commands execute inline, in the order they were received.
/// Returns on [`ShardMessage::Shutdown`] or once every sender is gone.
pub async fn run(shard: Rc<Shard>, mut inbox: mpsc::Receiver<ShardMessage>) {
    info!(shard = shard.id(), "shard started");

    while let Some(message) = inbox.recv().await {
        match message {
            ShardMessage::Forwarded {
                command,
                respond_to,
            } => {
                let reply = shard.execute_local(&command);
                // The requester may already have timed out.
                let _ = respond_to.send(reply);
            }
            ShardMessage::Submit {
                request,
                respond_to,
            } => {
                let coordinator = Coordinator::new(Rc::clone(&shard));
                tokio::task::spawn_local(async move {
                    let reply = coordinator.execute(request).await;
                    let _ = respond_to.send(reply);
                });
            }
            ShardMessage::Connection(stream) => match TcpStream::from_std(stream) {
                Ok(stream) => {
                    debug!(shard = shard.id(), "serving new connection");
                    let coordinator = Coordinator::new(Rc::clone(&shard));
                    tokio::task::spawn_local(handle_connection(stream, coordinator));
                }
                Err(e) => warn!(shard = shard.id(), error = %e, "failed to register connection"),
            },
            ShardMessage::Shutdown => break,
        }
    }

    info!(shard = shard.id(), "shard stopped");
}
