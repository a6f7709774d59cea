use tandem_core::RoomKey;

use crate::integration::{create_active_room, create_registry, init_tracing};

#[tokio::test]
async fn test_stale_metadata_superseded() {
    init_tracing();

    let rooms = create_registry();
    let key = RoomKey::new("/abc");
    let (a, b) = create_active_room(&rooms, &key).await;

    a.send_metadata("first.txt", "text/plain", 5)
        .await
        .expect("Failed to send metadata");
    a.send_metadata("second.txt", "text/plain", 2)
        .await
        .expect("Failed to send metadata");
    a.send_binary(b"hi").await.expect("Failed to send binary");

    let (received, bytes) = b.expect_transfer().await.expect("B got no transfer");
    assert_eq!(received.file_name, "second.txt");
    assert_eq!(bytes, b"hi".to_vec());

    let (echo, _) = a.expect_transfer().await.expect("A got no echo");
    assert_eq!(echo.file_name, "second.txt");

    a.sync(&rooms).await.expect("Sync failed");
    assert!(a.is_silent().await, "No ghost transfer for the stale metadata");
    assert!(b.is_silent().await, "No ghost transfer for the stale metadata");
}
