use std::collections::HashMap;

use common::{Item, ItemId, Money};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::Cart;

fn catalog(size: usize) -> Vec<Item> {
    (0..size)
        .map(|i| {
            Item::new(
                format!("item-{i}"),
                format!("Item {i}"),
                Money::from_cents(100 + i as i64),
                50,
            )
        })
        .collect()
}

fn bench_add_remove(c: &mut Criterion) {
    let items = catalog(20);

    c.bench_function("cart/add_remove_20_items", |b| {
        b.iter(|| {
            let mut cart = Cart::new();
            for item in &items {
                cart.add(item);
                cart.add(item);
            }
            for item in &items {
                cart.remove(&item.id);
            }
            cart
        });
    });
}

fn bench_total(c: &mut Criterion) {
    let items = catalog(50);
    let mut cart = Cart::new();
    for item in &items {
        cart.add(item);
    }

    c.bench_function("cart/total_50_lines", |b| {
        b.iter(|| cart.total());
    });
}

fn bench_clamp(c: &mut Criterion) {
    let items = catalog(50);
    let stock: HashMap<ItemId, u32> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id.clone(), (i % 3) as u32))
        .collect();

    c.bench_function("cart/clamp_50_lines", |b| {
        b.iter(|| {
            let mut cart = Cart::new();
            for item in &items {
                cart.add(item);
                cart.add(item);
            }
            cart.clamp_to_available(&stock)
        });
    });
}

criterion_group!(benches, bench_add_remove, bench_total, bench_clamp);
criterion_main!(benches);
