//! Failure recovery for tool calls
//!
//! An ordered chain of (predicate, recovery) entries converts errors
//! raised while handling one call into transport-ready responses. The
//! first entry whose predicate matches wins, so entries go from most
//! specific category to most general. Errors matching no entry fall back
//! to a logged generic failure envelope; the chain itself never fails.

use crate::error::ServerError;
use crate::response::Envelope;
use serde_json::Value;
use tracing::error;

/// Matches an error against one failure category
pub type ErrorPredicate = Box<dyn Fn(&ServerError) -> bool + Send + Sync>;

/// Maps (error, tool name) to a transport-ready response
pub type RecoveryFn = Box<dyn Fn(&ServerError, &str) -> Value + Send + Sync>;

/// Ordered, first-match-wins error recovery chain
#[derive(Default)]
pub struct ErrorChain {
    entries: Vec<(ErrorPredicate, RecoveryFn)>,
}

impl ErrorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Order matters: narrow categories go before broad
    /// ones, since later entries are never consulted once one matches.
    pub fn on<P, R>(mut self, predicate: P, recovery: R) -> Self
    where
        P: Fn(&ServerError) -> bool + Send + Sync + 'static,
        R: Fn(&ServerError, &str) -> Value + Send + Sync + 'static,
    {
        self.entries.push((Box::new(predicate), Box::new(recovery)));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert `err` raised while handling `tool_name` into a response.
    ///
    /// Unmatched errors are logged for operator diagnosis and become a
    /// generic `Internal error` envelope.
    pub fn recover(&self, err: &ServerError, tool_name: &str) -> Value {
        for (predicate, recovery) in &self.entries {
            if predicate(err) {
                return recovery(err, tool_name);
            }
        }

        error!(tool = tool_name, "Unexpected error in tool call: {}", err);
        Envelope::err(format!("Internal error: {}", err)).into_value()
    }
}
