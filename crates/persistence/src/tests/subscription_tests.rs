// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::thursday_at;
use crate::{Persistence, PushSubscriptionData};

#[test]
fn test_resubscribing_refreshes_keys() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let first: i64 = persistence
        .upsert_push_subscription("ana", "https://push.example/1", "key-a", "auth-a", thursday_at(9))
        .unwrap();
    let second: i64 = persistence
        .upsert_push_subscription("ana", "https://push.example/1", "key-b", "auth-b", thursday_at(10))
        .unwrap();

    assert_eq!(first, second);
    let stored: Vec<PushSubscriptionData> = persistence.list_push_subscriptions().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].p256dh, "key-b");
    assert_eq!(stored[0].auth, "auth-b");
}

#[test]
fn test_same_endpoint_for_two_users_is_two_subscriptions() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .upsert_push_subscription("ana", "https://push.example/1", "k", "a", thursday_at(9))
        .unwrap();
    persistence
        .upsert_push_subscription("luis", "https://push.example/1", "k", "a", thursday_at(9))
        .unwrap();

    assert_eq!(persistence.list_push_subscriptions().unwrap().len(), 2);
}

#[test]
fn test_unsubscribe_by_endpoint_and_by_id() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .upsert_push_subscription("ana", "https://push.example/1", "k", "a", thursday_at(9))
        .unwrap();
    let gone: i64 = persistence
        .upsert_push_subscription("ana", "https://push.example/2", "k", "a", thursday_at(9))
        .unwrap();

    assert_eq!(
        persistence
            .delete_push_subscription("ana", "https://push.example/1")
            .unwrap(),
        1
    );
    assert_eq!(
        persistence
            .delete_push_subscription("luis", "https://push.example/2")
            .unwrap(),
        0
    );
    assert_eq!(persistence.delete_push_subscription_by_id(gone).unwrap(), 1);
    assert!(persistence.list_push_subscriptions().unwrap().is_empty());
}
