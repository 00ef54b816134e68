//! Throughput benchmarks for the core ledger operations

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use token_core::{Address, Ledger, TokenMetadata};

fn bench_transfer(c: &mut Criterion) {
    let deployer = Address::from_low_u64(1);
    let recipient = Address::from_low_u64(2);
    let ledger = Ledger::new(
        TokenMetadata::new("Bench Token", "BNCH"),
        deployer,
        1_000_000_000,
    )
    .unwrap();

    c.bench_function("transfer", |b| {
        b.iter_batched(
            || ledger.clone(),
            |mut ledger| ledger.transfer(deployer, recipient, 1).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_transfer_from(c: &mut Criterion) {
    let deployer = Address::from_low_u64(1);
    let spender = Address::from_low_u64(2);
    let mut ledger = Ledger::new(
        TokenMetadata::new("Bench Token", "BNCH"),
        deployer,
        1_000_000_000,
    )
    .unwrap();
    ledger.approve(deployer, spender, 1_000_000_000).unwrap();

    c.bench_function("transfer_from", |b| {
        b.iter_batched(
            || ledger.clone(),
            |mut ledger| {
                ledger
                    .transfer_from(spender, deployer, spender, 1)
                    .unwrap()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_transfer, bench_transfer_from);
criterion_main!(benches);
