use bytes::BytesMut;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::{
    commands::CommandError,
    forwarding::Coordinator,
    input::{read_resp_value, CommandReadError},
};

/// Serves one client connection until it closes.
///
/// Requests are handled strictly one at a time, so replies always go out in
/// request order even when some of them are forwarded to other shards. A
/// malformed request gets an error reply and decoding resumes right after it,
/// so requests pipelined behind it are still answered. I/O errors close the
/// connection.
pub async fn handle_connection(mut stream: TcpStream, coordinator: Coordinator) {
    let peer = stream
        .peer_addr()
        .map(|address| address.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let shard = coordinator.shard_id();

    debug!(%peer, shard, "connection opened");

    let (mut reader, mut writer) = stream.split();
    let mut buffer = BytesMut::with_capacity(4096);
    let mut output = BytesMut::with_capacity(4096);

    loop {
        let reply = match read_resp_value(&mut reader, &mut buffer).await {
            Ok(request) => coordinator.execute(request).await,
            Err(CommandReadError::ConnectionClosed) => break,
            Err(CommandReadError::RespParseError(e)) => {
                warn!(%peer, shard, error = %e, "protocol error");
                CommandError::from(e).as_resp()
            }
            Err(CommandReadError::IoError(e)) => {
                warn!(%peer, shard, error = %e, "failed to read from connection");
                break;
            }
        };

        output.clear();
        reply.encode_into(&mut output);

        if let Err(e) = writer.write_all(&output).await {
            warn!(%peer, shard, error = %e, "failed to write reply");
            break;
        }
    }

    debug!(%peer, shard, "connection closed");
}
