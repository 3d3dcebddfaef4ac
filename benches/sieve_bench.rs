use criterion::{black_box, criterion_group, criterion_main, Criterion};
use primeaudit::accuracy;
use primeaudit::prime_set::PrimeSet;
use primeaudit::sieve;

fn bench_prime_bitmap_default(c: &mut Criterion) {
    c.bench_function("prime_bitmap(1_299_709)", |b| {
        b.iter(|| sieve::prime_bitmap(black_box(1_299_709)));
    });
}

fn bench_prime_set_default(c: &mut Criterion) {
    c.bench_function("PrimeSet::generate(1_299_709)", |b| {
        b.iter(|| PrimeSet::generate(black_box(1_299_709)));
    });
}

fn bench_meets_bound_high_certainty(c: &mut Criterion) {
    c.bench_function("meets_bound(certainty=10_000)", |b| {
        b.iter(|| accuracy::meets_bound(black_box(100_000), black_box(100_001), black_box(10_000)));
    });
}

criterion_group!(
    benches,
    bench_prime_bitmap_default,
    bench_prime_set_default,
    bench_meets_bound_high_certainty,
);
criterion_main!(benches);
