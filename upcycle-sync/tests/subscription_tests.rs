use serde_json::json;
use upcycle_sync::{Document, Subscription, SyncError};
use upcycle_types::ItemId;

fn one_doc() -> Vec<Document> {
    vec![Document {
        id: ItemId::parse("a").unwrap(),
        data: json!({}),
    }]
}

#[tokio::test]
async fn pushes_arrive_in_order() {
    let (tx, mut sub) = Subscription::channel();
    assert!(tx.push(Vec::new()));
    assert!(tx.push(one_doc()));

    assert_eq!(sub.next().await.unwrap().unwrap().len(), 0);
    assert_eq!(sub.next().await.unwrap().unwrap().len(), 1);
}

#[tokio::test]
async fn nothing_after_error() {
    let (tx, mut sub) = Subscription::channel();
    let extra = tx.clone();
    tx.fail("boom");
    extra.push(one_doc());

    assert!(matches!(sub.next().await, Some(Err(SyncError::Subscription(_)))));
    assert!(sub.next().await.is_none());
    assert!(extra.is_closed());
}

#[tokio::test]
async fn closes_when_senders_drop() {
    let (tx, mut sub) = Subscription::channel();
    drop(tx);
    assert!(sub.next().await.is_none());
}

#[test]
fn push_to_dropped_subscription_reports_false() {
    let (tx, sub) = Subscription::channel();
    drop(sub);
    assert!(!tx.push(Vec::new()));
    assert!(tx.is_closed());
}
