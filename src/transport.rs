//! Frame transport for the serve loop
//!
//! MCP servers speak newline-delimited JSON-RPC over stdio. The
//! [`Transport`] trait keeps the framing swappable and the lifecycle
//! testable; [`JsonLineTransport`] covers stdio and any other buffered
//! async reader/writer pair.

use crate::error::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::debug;

/// Channel carrying calls in and responses out, one frame at a time
#[async_trait]
pub trait Transport: Send {
    /// Next non-empty frame, or None once the channel closes.
    async fn receive(&mut self) -> Result<Option<String>>;

    /// Transmit one frame.
    async fn send(&mut self, frame: &str) -> Result<()>;
}

/// Newline-delimited frames over a buffered reader/writer pair
pub struct JsonLineTransport<R, W> {
    reader: R,
    writer: W,
    line: String,
}

impl JsonLineTransport<BufReader<Stdin>, Stdout> {
    /// Transport over the process stdio streams (the MCP stdio transport).
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> JsonLineTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: String::new(),
        }
    }
}

#[async_trait]
impl<R, W> Transport for JsonLineTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn receive(&mut self) -> Result<Option<String>> {
        loop {
            self.line.clear();

            if self.reader.read_line(&mut self.line).await? == 0 {
                debug!("Transport closed (EOF)");
                return Ok(None);
            }

            let frame = self.line.trim();
            if frame.is_empty() {
                continue;
            }

            return Ok(Some(frame.to_string()));
        }
    }

    async fn send(&mut self, frame: &str) -> Result<()> {
        self.writer.write_all(frame.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}
