//! Local-or-remote execution of client commands.
//!
//! A [`Coordinator`] belongs to one shard. Commands whose key that shard
//! owns run on its store right away. Everything else is sent to the owning
//! shard's inbox together with a oneshot reply channel, and only the calling
//! task waits for the answer.

use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::{
    commands::{CommandError, CommandHandler},
    resp::RespValue,
    shard::{Shard, ShardMessage},
};

#[derive(Error, Debug, PartialEq, Clone)]
pub enum ForwardError {
    #[error("shard {shard} is unavailable")]
    ShardUnavailable { shard: usize },
    #[error("shard {shard} did not answer within {}ms", .after.as_millis())]
    Timeout { shard: usize, after: Duration },
    #[error("shard {shard} dropped the reply")]
    ReplyDropped { shard: usize },
}

#[derive(Debug, Clone)]
pub struct Coordinator {
    shard: Rc<Shard>,
}

impl Coordinator {
    pub fn new(shard: Rc<Shard>) -> Self {
        Self { shard }
    }

    pub fn shard_id(&self) -> usize {
        self.shard.id()
    }

    /// Decodes `request` into a command and runs it wherever it belongs.
    /// Every failure comes back as an error reply.
    pub async fn execute(&self, request: RespValue) -> RespValue {
        match CommandHandler::new(request) {
            Ok(command) => self.dispatch(command).await,
            Err(e) => e.as_resp(),
        }
    }

    pub async fn dispatch(&self, command: CommandHandler) -> RespValue {
        let owner = match command.key() {
            Some(key) => self.shard.topology().owner_of(key),
            None => self.shard.id(),
        };

        if owner == self.shard.id() {
            return self.shard.execute_local(&command);
        }

        debug!(
            from = self.shard.id(),
            to = owner,
            command = %command.name,
            "forwarding command"
        );

        match self.forward(owner, command).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(from = self.shard.id(), error = %e, "forwarding failed");
                CommandError::from(e).as_resp()
            }
        }
    }

    /// Sends `command` to shard `owner` and waits for its reply. The forward
    /// timeout covers both waiting for inbox space and waiting for the reply.
    async fn forward(&self, owner: usize, command: CommandHandler) -> Result<RespValue, ForwardError> {
        let topology = self.shard.topology();
        let timeout = topology.forward_timeout();

        let mailbox = topology
            .mailbox(owner)
            .ok_or(ForwardError::ShardUnavailable { shard: owner })?;

        let (respond_to, reply) = oneshot::channel();

        let exchange = async {
            mailbox
                .send(ShardMessage::Forwarded {
                    command,
                    respond_to,
                })
                .await
                .map_err(|_| ForwardError::ShardUnavailable { shard: owner })?;

            reply
                .await
                .map_err(|_| ForwardError::ReplyDropped { shard: owner })
        };

        tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| ForwardError::Timeout {
                shard: owner,
                after: timeout,
            })?
    }
}
