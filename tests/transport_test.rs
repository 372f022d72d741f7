//! Line framing tests for JsonLineTransport over in-memory pipes.

use mcp_base::{JsonLineTransport, Transport};
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio_test::assert_ok;

#[tokio::test]
async fn receive_splits_frames_and_skips_blank_lines() {
    let (mut client_out, server_in) = duplex(1024);
    let (server_out, _client_in) = duplex(1024);
    let mut transport = JsonLineTransport::new(BufReader::new(server_in), server_out);

    client_out
        .write_all(b"{\"a\":1}\n\n   \n{\"b\":2}\n")
        .await
        .unwrap();
    drop(client_out); // EOF

    assert_eq!(transport.receive().await.unwrap().as_deref(), Some("{\"a\":1}"));
    assert_eq!(transport.receive().await.unwrap().as_deref(), Some("{\"b\":2}"));
    assert_eq!(transport.receive().await.unwrap(), None);
}

#[tokio::test]
async fn receive_delivers_trailing_frame_without_newline() {
    let (mut client_out, server_in) = duplex(1024);
    let (server_out, _client_in) = duplex(1024);
    let mut transport = JsonLineTransport::new(BufReader::new(server_in), server_out);

    client_out.write_all(b"{\"last\":true}").await.unwrap();
    drop(client_out);

    assert_eq!(
        transport.receive().await.unwrap().as_deref(),
        Some("{\"last\":true}")
    );
    assert_eq!(transport.receive().await.unwrap(), None);
}

#[tokio::test]
async fn send_appends_newline_and_flushes() {
    let (_client_out, server_in) = duplex(16);
    let (server_out, mut client_in) = duplex(1024);
    let mut transport = JsonLineTransport::new(BufReader::new(server_in), server_out);

    assert_ok!(transport.send(r#"{"jsonrpc":"2.0","id":1}"#).await);

    let mut buf = vec![0u8; 64];
    let n = client_in.read(&mut buf).await.unwrap();
    assert_eq!(&buf[..n], b"{\"jsonrpc\":\"2.0\",\"id\":1}\n");
}

#[tokio::test]
async fn frames_whitespace_is_trimmed() {
    let (mut client_out, server_in) = duplex(1024);
    let (server_out, _client_in) = duplex(1024);
    let mut transport = JsonLineTransport::new(BufReader::new(server_in), server_out);

    client_out.write_all(b"  {\"a\":1}  \r\n").await.unwrap();
    drop(client_out);

    assert_eq!(transport.receive().await.unwrap().as_deref(), Some("{\"a\":1}"));
}
