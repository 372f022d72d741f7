//! Tool descriptors, the server contract, and name-based dispatch
//!
//! A concrete server implements [`ToolServer`] to declare its tools and
//! handle calls; most implementations delegate the handling to a
//! [`ToolRegistry`], which maps tool names to handler closures.

use crate::error::Result;
use crate::response::Envelope;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Tool schema definition advertised through `tools/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (e.g., "notes.search")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: Value,
}

/// Keyword-style arguments supplied with one tool call
pub type Arguments = Map<String, Value>;

/// Contract a concrete server supplies to the lifecycle layer.
///
/// `handle_tool` returns an [`Envelope`] for normal outcomes (including
/// business-level failures) and `Err` for failures the caller's
/// [`ErrorChain`](crate::ErrorChain) should recover.
#[async_trait]
pub trait ToolServer: Send + Sync {
    /// Server name used in the initialize handshake and diagnostics.
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        "MCP server"
    }

    /// Tools advertised to the caller for discovery.
    fn tools(&self) -> Vec<Tool>;

    /// Handle one tool call.
    async fn handle_tool(&self, name: &str, arguments: &Arguments) -> Result<Envelope>;
}

/// Boxed tool handler stored in a registry
pub type ToolFn = Box<dyn Fn(&Arguments) -> Result<Envelope> + Send + Sync>;

/// Maps tool names to handlers and dispatches by name.
///
/// Registration happens before serving starts; dispatch takes `&self`, so
/// the registry is structurally read-only for the rest of the process
/// lifetime.
#[derive(Default)]
pub struct ToolRegistry {
    handlers: HashMap<String, ToolFn>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, overwriting any previous handler
    /// for that name. An overwritten name keeps its original position in
    /// [`tool_names`](Self::tool_names). Returns `&mut Self` so a block of
    /// registrations chains into one expression.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Arguments) -> Result<Envelope> + Send + Sync + 'static,
    {
        let name = name.into();
        if !self.handlers.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.handlers.insert(name, Box::new(handler));
        self
    }

    /// Dispatch a call to the handler registered under `name`.
    ///
    /// An unknown name is a normal failure envelope, not an `Err`. A known
    /// handler's result is returned unmodified; the registry performs no
    /// recovery of handler errors.
    pub fn dispatch(&self, name: &str, arguments: &Arguments) -> Result<Envelope> {
        match self.handlers.get(name) {
            Some(handler) => handler(arguments),
            None => Ok(Envelope::err(format!("Unknown tool: {}", name))),
        }
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
