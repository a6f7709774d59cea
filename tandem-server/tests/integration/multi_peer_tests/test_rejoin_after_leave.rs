use tandem_core::{Role, RoomKey, RoomState};
use tandem_server::status;

use crate::integration::{create_active_room, create_registry, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_rejoin_after_leave() {
    init_tracing();

    let rooms = create_registry();
    let key = RoomKey::new("/abc");
    let (a, b) = create_active_room(&rooms, &key).await;

    a.leave().await.expect("Leave failed");
    b.expect_status().await.expect("No disconnect status");

    let mut c = TestPeer::new();
    let role = c.join(&rooms, &key).await.expect("Rejoin failed");
    assert_eq!(role, Role::Second, "Joiner into a waiting room is second");

    for peer in [&b, &c] {
        let (message, ready) = peer.expect_status().await.expect("No ready status");
        assert_eq!(message, status::READY);
        assert!(ready);
    }
    assert_eq!(
        rooms.inspect(&key).await.expect("Room should exist").state,
        RoomState::Active
    );

    c.send_file("back.txt", "text/plain", b"back")
        .await
        .expect("Send failed");
    let (received, bytes) = b.expect_transfer().await.expect("B got no transfer");
    assert_eq!(received.file_name, "back.txt");
    assert_eq!(bytes, b"back".to_vec());
}
