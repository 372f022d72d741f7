//! mcp-base - Base framework for MCP tool servers
//!
//! Standardizes the three concerns every MCP tool server needs:
//! - **Dispatch**: a name-to-handler [`ToolRegistry`] with a stable
//!   contract (unknown tools are normal error envelopes, handler failures
//!   propagate to the recovery layer)
//! - **Recovery**: an [`ErrorChain`] converting failures raised during a
//!   call into uniform error envelopes instead of crashing the serve loop
//! - **Lifecycle**: [`McpServer`] wiring flag interpretation, an optional
//!   health check, an optional startup hook, and the JSON-RPC stdio serve
//!   loop around any [`ToolServer`] implementation
//!
//! # Example
//!
//! ```ignore
//! use mcp_base::{Arguments, Envelope, McpServer, Result, Tool, ToolRegistry, ToolServer};
//!
//! struct NotesServer {
//!     registry: ToolRegistry,
//! }
//!
//! impl NotesServer {
//!     fn new() -> Self {
//!         let mut registry = ToolRegistry::new();
//!         registry.register("notes.save", |args: &Arguments| {
//!             Ok(Envelope::ok().field("id", "note-1"))
//!         });
//!         Self { registry }
//!     }
//! }
//!
//! #[async_trait::async_trait]
//! impl ToolServer for NotesServer {
//!     fn name(&self) -> &str { "notes" }
//!     fn tools(&self) -> Vec<Tool> { vec![/* schemas */] }
//!     async fn handle_tool(&self, name: &str, args: &Arguments) -> Result<Envelope> {
//!         self.registry.dispatch(name, args)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     mcp_base::init_logging();
//!     let outcome = McpServer::new(NotesServer::new())
//!         .with_health_check(|| 0)
//!         .run()
//!         .await?;
//!     std::process::exit(outcome.exit_code());
//! }
//! ```

pub mod error;
pub mod protocol;
pub mod recovery;
pub mod response;
pub mod server;
pub mod tools;
pub mod transport;

// Re-export commonly used types
pub use error::{Result, ServerError};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use recovery::ErrorChain;
pub use response::Envelope;
pub use server::{McpServer, RunOutcome, ServeArgs};
pub use tools::{Arguments, Tool, ToolRegistry, ToolServer};
pub use transport::{JsonLineTransport, Transport};

use tracing_subscriber::EnvFilter;

/// Initialize tracing output for a server binary.
///
/// Logs go to stderr, not stdout: stdout carries the wire protocol.
/// Filter defaults to `info`; override with `RUST_LOG`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
