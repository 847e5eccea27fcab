//! Reporting views: recomputed on read, never cached.

use clothier_core::{ItemId, Money};
use clothier_inventory::{NewItem, RestockStatus};
use clothier_sales::SaleRequest;
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

async fn sell(store: &Store, item_id: ItemId, size: &str, quantity: i64) {
    let outcome = store
        .record_sale(SaleRequest {
            item_id,
            size: size.to_string(),
            quantity,
            unit_price: Money::from_cents(5999),
        })
        .await
        .unwrap();
    assert!(matches!(outcome, clothier_store::SaleOutcome::Admitted { .. }));
}

#[tokio::test]
async fn inventory_status_totals_and_breaks_down_by_size() {
    let store = store().await;
    let item_id = seed_item(&store, "Denim Jacket", &[("S", 4), ("M", 6)]).await;

    let rows = store.inventory_status().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item_id, item_id);
    assert_eq!(rows[0].total_quantity, 10);
    assert_eq!(rows[0].size_breakdown, "M: 6, S: 4");
}

#[tokio::test]
async fn sales_summary_lists_recorded_sales() {
    let store = store().await;
    let item_id = seed_item(&store, "Denim Jacket", &[("M", 30)]).await;
    sell(&store, item_id, "M", 2).await;

    let rows = store.sales_summary().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item_name, "Denim Jacket");
    assert_eq!(rows[0].size, "M");
    assert_eq!(rows[0].quantity, 2);
    assert_eq!(rows[0].total_price, Money::from_cents(11998));
}

#[tokio::test]
async fn restock_includes_low_stock_items_without_sales() {
    let store = store().await;
    let item_id = seed_item(&store, "Denim Jacket", &[("M", 5)]).await;

    let rows = store.restock_recommendations().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item_id, item_id);
    assert_eq!(rows[0].current_stock, 5);
    // No sales history: the divisor falls back to 1.
    assert_eq!(rows[0].days_until_stockout, 5);
    assert_eq!(rows[0].status, RestockStatus::UrgentReorder);
}

#[tokio::test]
async fn restock_classifies_by_projected_days_of_cover() {
    let store = store().await;
    let item_id = seed_item(&store, "Denim Jacket", &[("M", 30)]).await;
    sell(&store, item_id, "M", 2).await;

    let rows = store.restock_recommendations().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].current_stock, 28);
    assert_eq!(rows[0].avg_daily_sales, 2.0);
    assert_eq!(rows[0].days_until_stockout, 14);
    assert_eq!(rows[0].status, RestockStatus::ReorderSoon);
}

#[tokio::test]
async fn restock_tier_comes_from_the_raw_quotient_not_the_rounded_days() {
    let store = store().await;
    let item_id = seed_item(&store, "Denim Jacket", &[("M", 25)]).await;
    sell(&store, item_id, "M", 3).await;

    // 22 / 3 = 7.33 days of cover: displays as 7 but is past the urgent
    // boundary.
    let rows = store.restock_recommendations().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].current_stock, 22);
    assert_eq!(rows[0].avg_daily_sales, 3.0);
    assert_eq!(rows[0].days_until_stockout, 7);
    assert_eq!(rows[0].status, RestockStatus::ReorderSoon);
}

#[tokio::test]
async fn restock_excludes_well_stocked_items_without_sales() {
    let store = store().await;
    seed_item(&store, "Wool Coat", &[("M", 100)]).await;

    assert!(store.restock_recommendations().await.unwrap().is_empty());
}

#[tokio::test]
async fn restock_orders_most_urgent_first() {
    let store = store().await;
    let urgent = seed_item(&store, "Denim Jacket", &[("M", 5)]).await;
    let soon = seed_item(&store, "Wool Coat", &[("M", 30)]).await;
    sell(&store, soon, "M", 2).await;

    let rows = store.restock_recommendations().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].item_id, urgent);
    assert_eq!(rows[1].item_id, soon);
}

#[tokio::test]
async fn order_summaries_join_names_and_concatenate_lines() {
    let store = store().await;
    let item_id = seed_item(&store, "Denim Jacket", &[("M", 30), ("S", 30)]).await;
    let customer_id = store.add_customer("Ada", Some("ada@example.com"), None).await.unwrap();
    let employee_id = store.add_employee("Grace").await.unwrap();
    let order_id = store.create_order(customer_id, employee_id).await.unwrap();

    store
        .add_order_item(order_id, item_id, "M", 2, Money::from_cents(5999))
        .await
        .unwrap();
    store
        .add_order_item(order_id, item_id, "S", 1, Money::from_cents(2500))
        .await
        .unwrap();

    let rows = store.order_summaries().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order_id, order_id);
    assert_eq!(rows[0].customer_name, "Ada");
    assert_eq!(rows[0].employee_name, "Grace");
    assert_eq!(rows[0].status, "Processing");
    assert_eq!(rows[0].total_amount, Money::from_cents(14498));
    assert_eq!(rows[0].items, "2 x Denim Jacket (M), 1 x Denim Jacket (S)");
}
