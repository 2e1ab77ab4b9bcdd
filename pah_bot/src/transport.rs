//! WebSocket transport feeding the table stream.

use anyhow::{Context, Result};
use futures_util::StreamExt;
use log::{debug, warn};
use poker_at_home::MessageSource;
use tokio::{net::TcpStream, runtime::Runtime};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// Adapts a `tokio-tungstenite` socket to the blocking [`MessageSource`]
/// contract, on a current-thread runtime owned by the source itself. The
/// dispatch loop stays runtime-agnostic; all async plumbing lives here.
pub struct WebSocketSource {
    runtime: Runtime,
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketSource {
    /// Connect to a `ws://` or `wss://` URL.
    pub fn connect(url: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start the transport runtime")?;
        let (socket, _) = runtime
            .block_on(connect_async(url))
            .with_context(|| format!("failed to connect to {url}"))?;
        debug!("connected to {url}");
        Ok(Self { runtime, socket })
    }
}

impl MessageSource for WebSocketSource {
    fn recv(&mut self) -> Result<Option<String>> {
        loop {
            let Some(frame) = self.runtime.block_on(self.socket.next()) else {
                return Ok(None);
            };
            match frame.context("websocket receive failed")? {
                Message::Text(text) => return Ok(Some(text.to_string())),
                Message::Close(_) => return Ok(None),
                // Pings are answered by tungstenite on the next socket poll.
                Message::Ping(_) | Message::Pong(_) => {}
                other => warn!("ignoring non-text frame: {other:?}"),
            }
        }
    }
}
