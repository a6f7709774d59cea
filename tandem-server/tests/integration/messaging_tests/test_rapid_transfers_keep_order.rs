use tandem_core::RoomKey;

use crate::integration::{create_active_room, create_registry, init_tracing};

#[tokio::test]
async fn test_rapid_transfers_keep_order() {
    init_tracing();

    let rooms = create_registry();
    let key = RoomKey::new("/abc");
    let (a, b) = create_active_room(&rooms, &key).await;

    let count = 20;
    for i in 0..count {
        let name = format!("file-{i}.bin");
        a.send_file(&name, "application/octet-stream", &[i as u8; 16])
            .await
            .expect("Send failed");
    }

    for i in 0..count {
        let (received, bytes) = b.expect_transfer().await.expect("Missing transfer");
        assert_eq!(received.file_name, format!("file-{i}.bin"));
        assert_eq!(bytes, vec![i as u8; 16]);

        let (echo, _) = a.expect_transfer().await.expect("Missing echo");
        assert_eq!(echo.file_name, received.file_name);
    }
}
