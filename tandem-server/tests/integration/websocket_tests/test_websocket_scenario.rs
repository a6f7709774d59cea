use serde_json::json;
use tandem_server::{RelayConfig, status};

use crate::integration::init_tracing;
use crate::utils::{WsPeer, spawn_server};

#[tokio::test]
async fn test_websocket_scenario() {
    init_tracing();

    let (addr, _state) = spawn_server(RelayConfig::default())
        .await
        .expect("Server failed to start");

    let mut a = WsPeer::connect(addr, "abc").await.expect("A failed to connect");
    assert_eq!(
        a.expect_status().await.expect("No waiting status"),
        (status::WAITING.to_string(), false)
    );

    let mut b = WsPeer::connect(addr, "abc").await.expect("B failed to connect");
    for peer in [&mut a, &mut b] {
        assert_eq!(
            peer.expect_status().await.expect("No ready status"),
            (status::READY.to_string(), true)
        );
    }

    a.send_metadata("x.txt", "text/plain", 3)
        .await
        .expect("Failed to send metadata");
    a.send_binary(&[0x01, 0x02, 0x03])
        .await
        .expect("Failed to send binary");

    let (metadata, bytes) = b.expect_transfer().await.expect("B got no transfer");
    assert_eq!(
        metadata,
        json!({
            "type": "file_metadata",
            "fileName": "x.txt",
            "fileType": "text/plain",
            "fileSize": 3,
            "isSender": false,
        })
    );
    assert_eq!(bytes, vec![0x01, 0x02, 0x03]);

    let (echo, echo_bytes) = a.expect_transfer().await.expect("A got no echo");
    assert_eq!(echo["isSender"], true);
    assert_eq!(echo["fileName"], "x.txt");
    assert_eq!(echo_bytes, bytes);

    // A client claiming to be the sender does not change what the recipient sees.
    let forged = json!({
        "type": "file_metadata",
        "fileName": "y.txt",
        "fileType": "",
        "fileSize": 0,
        "isSender": true,
    });
    b.send_text(&forged.to_string()).await.expect("Send failed");
    b.send_binary(&[]).await.expect("Send failed");
    let (metadata, bytes) = a.expect_transfer().await.expect("A got no transfer");
    assert_eq!(metadata["isSender"], false);
    assert!(bytes.is_empty());
    b.expect_transfer().await.expect("B got no echo");

    b.close().await.expect("Close failed");
    assert_eq!(
        a.expect_status().await.expect("No disconnect status"),
        (status::DISCONNECTED.to_string(), false)
    );
}
