use tandem_server::{RelayConfig, status};

use crate::integration::init_tracing;
use crate::utils::{WsPeer, spawn_server};

#[tokio::test]
async fn test_room_full_over_websocket() {
    init_tracing();

    let (addr, _state) = spawn_server(RelayConfig::default())
        .await
        .expect("Server failed to start");

    let mut a = WsPeer::connect(addr, "abc").await.expect("A failed to connect");
    a.expect_status().await.expect("No waiting status");
    let mut b = WsPeer::connect(addr, "abc").await.expect("B failed to connect");
    a.expect_status().await.expect("No ready status");
    b.expect_status().await.expect("No ready status");

    let mut c = WsPeer::connect(addr, "abc").await.expect("C failed to connect");
    let (message, ready) = c.expect_status().await.expect("No room full notice");
    assert_eq!(message, status::ROOM_FULL);
    assert!(!ready);
    c.expect_closed().await.expect("C should be closed");

    // The occupants are untouched.
    a.send_metadata("ok.txt", "text/plain", 2)
        .await
        .expect("Send failed");
    a.send_binary(b"ok").await.expect("Send failed");
    let (metadata, bytes) = b.expect_transfer().await.expect("B got no transfer");
    assert_eq!(metadata["fileName"], "ok.txt");
    assert_eq!(bytes, b"ok".to_vec());
}
