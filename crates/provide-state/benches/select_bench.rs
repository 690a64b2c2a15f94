//! Resolver benchmarks: selector normalization, joining, and selection
//! over a synthetic user tree.

use std::hint::black_box;
use std::rc::Rc;

use criterion::{Criterion, criterion_group, criterion_main};
use provide_state::{
    Listener, Selector, SelectorMap, StateProvider, Store, Subscription, Value, join_selectors,
};

/// Read-only store; notification is irrelevant to these benchmarks.
struct FrozenStore {
    state: Value,
}

impl Store for FrozenStore {
    fn state(&self) -> Value {
        self.state.clone()
    }

    fn subscribe(&self, _listener: Listener) -> Subscription {
        Subscription::new(|| {})
    }

    fn dispatch(&self, _action: Value) {}
}

fn user_tree(users: i64) -> Value {
    Value::map([(
        "users",
        Value::map((0..users).map(|id| {
            (
                id.to_string(),
                Value::map([
                    ("name", Value::from(format!("user-{id}"))),
                    ("score", Value::from(id)),
                ]),
            )
        })),
    )])
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_text", |b| {
        let selector = Selector::from("users.123.profile.name");
        b.iter(|| black_box(&selector).normalize());
    });

    c.bench_function("join_scope_and_binding", |b| {
        b.iter(|| {
            join_selectors([
                black_box(Selector::from("users.123")),
                black_box(Selector::from(["profile", "name"])),
            ])
        });
    });
}

fn bench_select(c: &mut Criterion) {
    let provider = StateProvider::new(Rc::new(FrozenStore {
        state: user_tree(1_000),
    }));
    let selectors: SelectorMap = (0..16)
        .map(|i| {
            (
                format!("name_{i}"),
                Selector::from(format!("users.{}.name", i * 50)),
            )
        })
        .collect();

    c.bench_function("select_16_bindings_of_1k_users", |b| {
        b.iter(|| provider.select(black_box(&selectors)).unwrap());
    });
}

criterion_group!(benches, bench_normalize, bench_select);
criterion_main!(benches);
