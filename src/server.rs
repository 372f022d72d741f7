//! Server lifecycle and serve loop
//!
//! [`McpServer`] wires a [`ToolServer`] implementation to a transport: it
//! interprets the two lifecycle flags, short-circuits into health-check
//! mode, runs the optional startup hook, then serves JSON-RPC requests
//! until the transport closes. Failures raised while handling a single
//! call are routed through the [`ErrorChain`] and never terminate the
//! loop; only a startup hook failure is fatal.

use crate::error::Result;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::recovery::ErrorChain;
use crate::tools::{Arguments, ToolServer};
use crate::transport::{JsonLineTransport, Transport};
use clap::Parser;
use serde_json::Value;
use tracing::{debug, error, info};

/// Protocol revision sent in the initialize handshake
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Lifecycle flags
///
/// Each flag is acted on only when the matching collaborator was supplied
/// at construction; otherwise it parses and is ignored.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Run the health check and exit with its status code
    #[arg(long)]
    pub health_check: bool,

    /// Skip startup hook execution
    #[arg(long)]
    pub skip_startup_hook: bool,
}

/// How a run ended.
///
/// The lifecycle never terminates the process itself; the entry point
/// translates the outcome with `std::process::exit(outcome.exit_code())`.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Health-check mode: terminate with this exit code (0 = healthy).
    Exit(i32),
    /// The serve loop ended because the transport closed.
    Served,
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Exit(code) => *code,
            RunOutcome::Served => 0,
        }
    }
}

type StartupHook = Box<dyn Fn() -> Result<()> + Send + Sync>;
type HealthCheck = Box<dyn Fn() -> i32 + Send + Sync>;

/// Lifecycle wrapper around a [`ToolServer`] implementation
pub struct McpServer<S> {
    server: S,
    startup_hook: Option<StartupHook>,
    health_check: Option<HealthCheck>,
    error_chain: ErrorChain,
}

impl<S: ToolServer> McpServer<S> {
    pub fn new(server: S) -> Self {
        Self {
            server,
            startup_hook: None,
            health_check: None,
            error_chain: ErrorChain::new(),
        }
    }

    /// Hook invoked once before serving (e.g., schema init). Errors are
    /// fatal: the run aborts and the process never reaches serving.
    pub fn with_startup_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.startup_hook = Some(Box::new(hook));
        self
    }

    /// Callable for `--health-check` mode; returns the process exit code.
    pub fn with_health_check<F>(mut self, check: F) -> Self
    where
        F: Fn() -> i32 + Send + Sync + 'static,
    {
        self.health_check = Some(Box::new(check));
        self
    }

    /// Custom recovery for failures raised during tool calls.
    pub fn with_error_chain(mut self, chain: ErrorChain) -> Self {
        self.error_chain = chain;
        self
    }

    /// Parse lifecycle flags from the process arguments and run over the
    /// stdio transport.
    pub async fn run(&self) -> Result<RunOutcome> {
        let args = ServeArgs::parse();
        let mut transport = JsonLineTransport::stdio();
        self.run_with_transport(&args, &mut transport).await
    }

    /// Run with explicit flags and transport.
    pub async fn run_with_transport<T: Transport>(
        &self,
        args: &ServeArgs,
        transport: &mut T,
    ) -> Result<RunOutcome> {
        // Health check mode: never reaches the serve loop
        if args.health_check {
            if let Some(check) = &self.health_check {
                return Ok(RunOutcome::Exit(check()));
            }
        }

        info!("{} MCP server starting...", self.server.name());

        // Run startup hook (unless skipped)
        if !args.skip_startup_hook {
            if let Some(hook) = &self.startup_hook {
                if let Err(e) = hook() {
                    error!("Startup hook failed: {}", e);
                    return Err(e);
                }
                info!("Startup hook completed");
            }
        }

        self.serve(transport).await?;
        Ok(RunOutcome::Served)
    }

    /// Main loop: one request at a time until the transport closes.
    async fn serve<T: Transport>(&self, transport: &mut T) -> Result<()> {
        info!("{} listening...", self.server.name());

        while let Some(frame) = transport.receive().await? {
            debug!("Received request: {}", frame);

            let Some(response) = self.process_frame(&frame).await else {
                continue;
            };

            let payload = serde_json::to_string(&response).unwrap_or_else(|e| {
                error!("Failed to serialize response: {}", e);
                // Static frame so a serialization failure cannot recurse
                r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"response serialization failed"},"id":null}"#
                    .to_string()
            });

            debug!("Sending response: {}", payload);
            transport.send(&payload).await?;
        }

        info!("{} MCP server shutting down", self.server.name());
        Ok(())
    }

    /// Process one raw frame; None means no response is owed.
    async fn process_frame(&self, frame: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(frame) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        if request.is_notification() {
            debug!("Ignoring notification: {}", request.method);
            return None;
        }

        Some(match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id,
                JsonRpcError::method_not_found(&request.method),
            ),
        })
    }

    /// Handshake: exchange server identity and capabilities
    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling initialize");

        JsonRpcResponse::success(
            request.id,
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": self.server.name(),
                    "description": self.server.description(),
                    "version": env!("CARGO_PKG_VERSION"),
                },
                "capabilities": {
                    "tools": {}
                }
            }),
        )
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling tools/list");

        JsonRpcResponse::success(
            request.id,
            serde_json::json!({
                "tools": self.server.tools()
            }),
        )
    }

    /// Protected call handler: dispatch failures become chain-recovered
    /// responses, never loop terminations.
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let Some(params) = request.params.as_object() else {
            return JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_params("params must be an object"),
            );
        };

        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_params("missing 'name' field"),
            );
        };

        let arguments: Arguments = params
            .get("arguments")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        debug!("Calling tool: {}", name);

        let payload = match self.server.handle_tool(name, &arguments).await {
            Ok(envelope) => envelope.into_value(),
            Err(e) => self.error_chain.recover(&e, name),
        };

        let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());

        JsonRpcResponse::success(
            request.id,
            serde_json::json!({
                "content": [
                    {
                        "type": "text",
                        "text": text
                    }
                ]
            }),
        )
    }
}
