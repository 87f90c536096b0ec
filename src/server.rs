use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::select;
use tracing::{debug, info, warn};

use crate::cluster::{
    default_shard_count, Cluster, ClusterConfig, DEFAULT_FORWARD_TIMEOUT, DEFAULT_INBOX_CAPACITY,
};

#[derive(Error, Debug, PartialEq)]
pub enum CliError {
    #[error("Invalid command line flag: {0}")]
    InvalidCommandLineFlag(String),
    #[error("Invalid value for command line flag {0}")]
    InvalidCommandLineFlagValue(String),
}

/// Server settings taken from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RedisServer {
    pub host: String,
    pub port: u16,
    pub shards: usize,
    pub forward_timeout: Duration,
    pub inbox_capacity: usize,
}

impl Default for RedisServer {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            shards: default_shard_count(),
            forward_timeout: DEFAULT_FORWARD_TIMEOUT,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

impl RedisServer {
    /// Parses process arguments. The first item is the program name and is
    /// skipped.
    ///
    /// # Flags
    ///
    /// * `--port <n>` - TCP port, 1 to 65535 (default 6379)
    /// * `--bind <host>` - Listen address (default 127.0.0.1)
    /// * `--shards <n>` - Number of shards, at least 1 (default: available cores)
    /// * `--forward-timeout-ms <n>` - Forwarding timeout, at least 1 (default 1000)
    /// * `--inbox-capacity <n>` - Per-shard inbox bound, at least 1 (default 1024)
    pub fn new<I: IntoIterator<Item = String>>(command_line_args: I) -> Result<Self, CliError> {
        let mut iter = command_line_args.into_iter().skip(1);
        let mut server = RedisServer::default();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--port" => {
                    let port = parse_flag_value::<u16>(&arg, iter.next())?;

                    if port == 0 {
                        return Err(CliError::InvalidCommandLineFlagValue(arg));
                    }

                    server.port = port;
                }
                "--bind" => {
                    let Some(host) = iter.next().filter(|host| !host.is_empty()) else {
                        return Err(CliError::InvalidCommandLineFlagValue(arg));
                    };

                    server.host = host;
                }
                "--shards" => {
                    server.shards = parse_positive_flag_value(&arg, iter.next())?;
                }
                "--forward-timeout-ms" => {
                    let millis = parse_positive_flag_value(&arg, iter.next())?;
                    server.forward_timeout = Duration::from_millis(millis as u64);
                }
                "--inbox-capacity" => {
                    server.inbox_capacity = parse_positive_flag_value(&arg, iter.next())?;
                }
                _ => return Err(CliError::InvalidCommandLineFlag(arg)),
            }
        }

        Ok(server)
    }

    pub fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig {
            shards: self.shards,
            forward_timeout: self.forward_timeout,
            inbox_capacity: self.inbox_capacity,
        }
    }

    /// Binds the listener, then starts the shards.
    pub async fn bind(&self) -> Result<ShardedServer> {
        let address = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("failed to bind {}", address))?;

        let cluster = Cluster::start(self.cluster_config()).context("failed to start shards")?;

        Ok(ShardedServer { listener, cluster })
    }
}

fn parse_flag_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, CliError> {
    value
        .and_then(|value| value.parse::<T>().ok())
        .ok_or_else(|| CliError::InvalidCommandLineFlagValue(flag.to_string()))
}

fn parse_positive_flag_value(flag: &str, value: Option<String>) -> Result<usize, CliError> {
    match parse_flag_value::<usize>(flag, value)? {
        0 => Err(CliError::InvalidCommandLineFlagValue(flag.to_string())),
        n => Ok(n),
    }
}

/// A bound listener plus the shards its connections are handed to.
#[derive(Debug)]
pub struct ShardedServer {
    listener: TcpListener,
    cluster: Cluster,
}

impl ShardedServer {
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until `shutdown` resolves, then stops the shards.
    ///
    /// Handing a connection to a busy shard waits at most the forward
    /// timeout, so a pending shutdown is noticed within that bound.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let ShardedServer { listener, cluster } = self;
        tokio::pin!(shutdown);

        info!(
            address = %listener.local_addr().context("listener has no address")?,
            shards = cluster.shard_count(),
            "accepting connections"
        );

        loop {
            select! {
                _ = &mut shutdown => {
                    info!("shutting down");
                    break;
                }
                accept_result = listener.accept() => {
                    handle_accept_result(accept_result, &cluster).await;
                }
            }
        }

        drop(listener);
        cluster.shutdown().await
    }

    pub async fn run_until_ctrl_c(self) -> Result<()> {
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = ?err, "failed to install ctrl-c handler");
            }
        })
        .await
    }
}

async fn handle_accept_result(result: std::io::Result<(TcpStream, SocketAddr)>, cluster: &Cluster) {
    let (stream, peer) = match result {
        Ok(accepted) => accepted,
        Err(err) => {
            warn!(error = ?err, "failed to accept connection");
            return;
        }
    };

    let stream = match stream.into_std() {
        Ok(stream) => stream,
        Err(err) => {
            warn!(%peer, error = ?err, "failed to detach connection");
            return;
        }
    };

    match cluster.assign_connection(stream).await {
        Ok(shard) => debug!(%peer, shard, "connection assigned"),
        Err(err) => warn!(%peer, error = %err, "failed to assign connection"),
    }
}
