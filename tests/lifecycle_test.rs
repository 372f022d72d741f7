//! Lifecycle tests: health-check short-circuit, startup hook ordering,
//! the skip flag, and fatal startup failures.

use async_trait::async_trait;
use mcp_base::{
    Arguments, Envelope, McpServer, Result, RunOutcome, ServeArgs, ServerError, Tool, ToolServer,
    Transport,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct NullServer;

#[async_trait]
impl ToolServer for NullServer {
    fn name(&self) -> &str {
        "null-server"
    }

    fn tools(&self) -> Vec<Tool> {
        vec![]
    }

    async fn handle_tool(&self, _name: &str, _arguments: &Arguments) -> Result<Envelope> {
        Ok(Envelope::ok())
    }
}

/// Transport that counts receive attempts and immediately reports EOF.
#[derive(Default)]
struct ClosedTransport {
    receives: usize,
}

#[async_trait]
impl Transport for ClosedTransport {
    async fn receive(&mut self) -> Result<Option<String>> {
        self.receives += 1;
        Ok(None)
    }

    async fn send(&mut self, _frame: &str) -> Result<()> {
        Ok(())
    }
}

fn flags(health_check: bool, skip_startup_hook: bool) -> ServeArgs {
    ServeArgs {
        health_check,
        skip_startup_hook,
    }
}

#[tokio::test]
async fn healthy_check_exits_zero_without_serving() {
    let server = McpServer::new(NullServer).with_health_check(|| 0);
    let mut transport = ClosedTransport::default();

    let outcome = server
        .run_with_transport(&flags(true, false), &mut transport)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Exit(0));
    assert_eq!(outcome.exit_code(), 0);
    // Serve loop was never entered
    assert_eq!(transport.receives, 0);
}

#[tokio::test]
async fn unhealthy_check_propagates_its_code() {
    let server = McpServer::new(NullServer).with_health_check(|| 1);
    let mut transport = ClosedTransport::default();

    let outcome = server
        .run_with_transport(&flags(true, false), &mut transport)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Exit(1));
    assert_eq!(outcome.exit_code(), 1);
}

#[tokio::test]
async fn health_flag_without_collaborator_serves_normally() {
    let server = McpServer::new(NullServer);
    let mut transport = ClosedTransport::default();

    let outcome = server
        .run_with_transport(&flags(true, false), &mut transport)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Served);
    assert_eq!(transport.receives, 1);
}

#[tokio::test]
async fn health_check_not_invoked_without_flag() {
    let server = McpServer::new(NullServer).with_health_check(|| panic!("must not run"));
    let mut transport = ClosedTransport::default();

    let outcome = server
        .run_with_transport(&flags(false, false), &mut transport)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Served);
}

#[tokio::test]
async fn startup_hook_runs_before_serving() {
    let ran = Arc::new(AtomicBool::new(false));
    let hook_ran = ran.clone();

    let server = McpServer::new(NullServer).with_startup_hook(move || {
        hook_ran.store(true, Ordering::SeqCst);
        Ok(())
    });
    let mut transport = ClosedTransport::default();

    let outcome = server
        .run_with_transport(&flags(false, false), &mut transport)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Served);
    assert!(ran.load(Ordering::SeqCst));
    assert_eq!(transport.receives, 1);
}

#[tokio::test]
async fn skip_flag_bypasses_startup_hook() {
    let ran = Arc::new(AtomicBool::new(false));
    let hook_ran = ran.clone();

    let server = McpServer::new(NullServer).with_startup_hook(move || {
        hook_ran.store(true, Ordering::SeqCst);
        Ok(())
    });
    let mut transport = ClosedTransport::default();

    let outcome = server
        .run_with_transport(&flags(false, true), &mut transport)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Served);
    assert!(!ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn failing_startup_hook_is_fatal() {
    let server = McpServer::new(NullServer)
        .with_startup_hook(|| Err(ServerError::Startup("schema init failed".to_string())));
    let mut transport = ClosedTransport::default();

    let err = server
        .run_with_transport(&flags(false, false), &mut transport)
        .await
        .unwrap_err();

    assert!(matches!(err, ServerError::Startup(_)));
    assert!(err.to_string().contains("schema init failed"));
    // Never reached the serve loop
    assert_eq!(transport.receives, 0);
}
