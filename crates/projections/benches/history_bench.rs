use common::{Item, ItemId, ItemRef, ItemSnapshot, Money, OrderId, OrderRecord, OrderRecordLine};
use criterion::{Criterion, criterion_group, criterion_main};
use projections::OrderHistoryView;

fn catalog(size: usize) -> Vec<Item> {
    (0..size)
        .map(|i| {
            Item::new(
                format!("item-{i}"),
                format!("Item {i}"),
                Money::from_cents(100 + i as i64),
                10,
            )
        })
        .collect()
}

/// Orders with three lines each: one embedded, one bare id, one missing.
fn records(n: usize) -> Vec<OrderRecord> {
    (0..n)
        .map(|i| OrderRecord {
            id: OrderId::new(format!("order-{i}")),
            lines: vec![
                OrderRecordLine {
                    item: Some(ItemRef::Resolved(ItemSnapshot {
                        id: ItemId::new(format!("item-{}", i % 20)),
                        name: format!("Item {}", i % 20),
                        unit_price: Money::from_cents(100),
                    })),
                    quantity: 2,
                },
                OrderRecordLine {
                    item: Some(ItemRef::Id(ItemId::new(format!("item-{}", i % 50)))),
                    quantity: 1,
                },
                OrderRecordLine {
                    item: None,
                    quantity: 1,
                },
            ],
            total_cost: Money::from_cents(400),
            created_at: None,
        })
        .collect()
}

fn bench_load_history(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let inventory = catalog(50);

    for n in [100, 1000] {
        let orders = records(n);
        c.bench_function(&format!("history/load_{n}_orders"), |b| {
            b.iter(|| {
                rt.block_on(async {
                    let view = OrderHistoryView::new();
                    view.load(&orders, inventory.as_slice()).await
                })
            });
        });
    }
}

criterion_group!(benches, bench_load_history);
criterion_main!(benches);
