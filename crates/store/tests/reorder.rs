//! Reorder service: threshold scan, per-item replenishment, ledger, history.

use clothier_core::{ItemId, Money};
use clothier_inventory::{NewItem, ReorderPolicy};
use clothier_store::Store;

async fn store() -> Store {
    Store::open_in_memory().await.unwrap()
}

async fn seed_item(store: &Store, name: &str, sizes: &[(&str, i64)]) -> ItemId {
    let mut item = NewItem::new(name, "Outerwear", Money::from_cents(5999), "");
    for (size, quantity) in sizes {
        item = item.with_size(*size, *quantity);
    }
    store.add_item(item).await.unwrap()
}

fn policy() -> ReorderPolicy {
    ReorderPolicy::new(20, 50).unwrap()
}

#[tokio::test]
async fn item_below_threshold_is_replenished_and_ledgered() {
    let store = store().await;
    let item_id = seed_item(&store, "Denim Jacket", &[("M", 10)]).await;

    let reordered = store.reorder(policy()).await.unwrap();
    assert_eq!(reordered.len(), 1);
    assert_eq!(reordered[0].item_id, item_id);
    assert_eq!(reordered[0].previous_quantity, 10);

    assert_eq!(store.total_stock(item_id).await.unwrap(), 60);

    let history = store.reorder_history(30).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].item_name, "Denim Jacket");
    assert_eq!(history[0].quantity_before, 10);
    assert_eq!(history[0].quantity_ordered, 50);
    assert_eq!(history[0].status, "Completed");

    let changes = store.inventory_changes(item_id).await.unwrap();
    let last = changes.last().unwrap();
    assert_eq!((last.old_quantity, last.new_quantity), (10, 60));
}

#[tokio::test]
async fn second_pass_selects_nothing() {
    let store = store().await;
    seed_item(&store, "Denim Jacket", &[("M", 10)]).await;

    assert_eq!(store.reorder(policy()).await.unwrap().len(), 1);
    assert!(store.reorder(policy()).await.unwrap().is_empty());
    assert_eq!(store.reorder_history(30).await.unwrap().len(), 1);
}

#[tokio::test]
async fn stock_at_threshold_is_not_selected() {
    let store = store().await;
    let item_id = seed_item(&store, "Denim Jacket", &[("M", 20)]).await;

    assert!(store.reorder(policy()).await.unwrap().is_empty());
    assert_eq!(store.total_stock(item_id).await.unwrap(), 20);
}

#[tokio::test]
async fn replenishment_tops_up_every_size_row() {
    let store = store().await;
    let item_id = seed_item(&store, "Denim Jacket", &[("S", 4), ("M", 6)]).await;

    store.reorder(policy()).await.unwrap();

    let sizes = store.size_stock(item_id).await.unwrap();
    assert_eq!(sizes.len(), 2);
    assert_eq!(sizes[0].size, "M");
    assert_eq!(sizes[0].quantity, 56);
    assert_eq!(sizes[1].size, "S");
    assert_eq!(sizes[1].quantity, 54);

    // One ledger row per item, not per size.
    assert_eq!(store.reorder_history(30).await.unwrap().len(), 1);
}

#[tokio::test]
async fn item_without_size_rows_is_not_scanned() {
    let store = store().await;
    seed_item(&store, "Phantom", &[]).await;
    let stocked = seed_item(&store, "Denim Jacket", &[("M", 5)]).await;

    let reordered = store.reorder(policy()).await.unwrap();
    assert_eq!(reordered.len(), 1);
    assert_eq!(reordered[0].item_id, stocked);
}

#[tokio::test]
async fn reorder_patterns_aggregate_repeatedly_reordered_items() {
    let store = store().await;
    let repeat = seed_item(&store, "Denim Jacket", &[("M", 10)]).await;
    let once = seed_item(&store, "Wool Coat", &[("M", 5)]).await;

    store.reorder(policy()).await.unwrap();
    // Drain the first item below the threshold and reorder again.
    store.set_stock(repeat, "M", 5).await.unwrap();
    store.reorder(policy()).await.unwrap();

    let patterns = store.reorder_patterns().await.unwrap();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].item_id, repeat);
    assert_eq!(patterns[0].item_name, "Denim Jacket");
    assert_eq!(patterns[0].reorder_frequency, 2);
    assert_eq!(patterns[0].avg_reorder_point, 7.5);
    assert_eq!(patterns[0].avg_reorder_quantity, 50.0);

    // The item reordered once carries no pattern yet.
    assert_eq!(store.reorder_history(30).await.unwrap().len(), 3);
    assert!(patterns.iter().all(|p| p.item_id != once));
}

#[tokio::test]
async fn only_items_below_threshold_are_selected() {
    let store = store().await;
    let low = seed_item(&store, "Denim Jacket", &[("M", 3)]).await;
    let high = seed_item(&store, "Wool Coat", &[("M", 40)]).await;

    let reordered = store.reorder(policy()).await.unwrap();
    assert_eq!(reordered.len(), 1);
    assert_eq!(reordered[0].item_id, low);
    assert_eq!(store.total_stock(high).await.unwrap(), 40);
}
