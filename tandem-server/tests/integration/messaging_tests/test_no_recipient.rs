use tandem_core::RoomKey;
use tandem_server::status;

use crate::integration::{create_registry, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_no_recipient() {
    init_tracing();

    let rooms = create_registry();
    let key = RoomKey::new("/alone");

    let mut a = TestPeer::new();
    a.join(&rooms, &key).await.expect("Join failed");
    a.expect_status().await.expect("No waiting status");

    a.send_file("x.txt", "text/plain", b"abc")
        .await
        .expect("Failed to send file");

    let (message, ready) = a.expect_status().await.expect("No notice");
    assert_eq!(message, status::NO_RECIPIENT);
    assert!(!ready);
    assert!(a.is_silent().await, "Nothing is echoed or queued");

    // Nothing is held back for a later recipient.
    let mut b = TestPeer::new();
    b.join(&rooms, &key).await.expect("Join failed");
    b.expect_status().await.expect("No ready status");
    assert!(b.is_silent().await);
}
