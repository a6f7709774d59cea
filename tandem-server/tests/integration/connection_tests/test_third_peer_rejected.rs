use tandem_core::RoomKey;
use tandem_server::RelayError;

use crate::integration::{create_active_room, create_registry, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_third_peer_rejected() {
    init_tracing();

    let rooms = create_registry();
    let key = RoomKey::new("/abc");
    let (a, b) = create_active_room(&rooms, &key).await;

    let mut c = TestPeer::new();
    let result = c.join(&rooms, &key).await;
    assert!(matches!(result, Err(RelayError::RoomFull)));

    assert!(a.is_silent().await, "Occupants are not told about the rejection");
    assert!(b.is_silent().await);

    let snapshot = rooms.inspect(&key).await.expect("Room should exist");
    assert_eq!(snapshot.occupants.len(), 2);
    assert!(snapshot.occupants.iter().all(|(id, _)| *id != c.peer_id));
}
