use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};
use std::num::NonZeroUsize;
use travel_itinerary_planner::{
    counting_sort_by_key, CheapestHeap, CircularQueue, CostTree, CostedBooking, Destination,
};

fn random_bookings(count: usize) -> Vec<CostedBooking> {
    let mut rng = thread_rng();
    (0..count)
        .map(|i| CostedBooking {
            cost: rng.gen_range(0..500_000) as f64,
            destination: *Destination::PRICED.choose(&mut rng).unwrap(),
            name: format!("passenger{}", i),
            phone: "0781234567".parse().unwrap(),
        })
        .collect()
}

// Insert then traverse the cost tree with shuffled input
pub fn cost_tree_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_tree");

    for size in [100, 1_000, 10_000].iter() {
        let bookings = random_bookings(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bookings, |b, bookings| {
            b.iter(|| {
                let mut tree = CostTree::new();
                for booking in bookings {
                    tree.insert(booking.clone());
                }
                black_box(tree.inorder().len())
            });
        });
    }

    group.finish();
}

pub fn cheapest_heap_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("cheapest_heap");

    for size in [100, 1_000, 10_000].iter() {
        let bookings = random_bookings(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bookings, |b, bookings| {
            b.iter(|| {
                let mut heap = CheapestHeap::new();
                for booking in bookings {
                    heap.add(booking.clone());
                }
                black_box(heap.get_cheapest().map(|b| b.cost))
            });
        });
    }

    group.finish();
}

// Enqueue with eviction on a full queue, the way the itinerary desk uses it
pub fn queue_churn_benchmark(c: &mut Criterion) {
    let capacity = NonZeroUsize::new(5).unwrap();
    c.bench_function("circular_queue_churn", |b| {
        b.iter(|| {
            let mut queue = CircularQueue::with_capacity(capacity);
            for i in 0..1_000u32 {
                if let Err(item) = queue.enqueue(i) {
                    queue.dequeue();
                    let _ = queue.enqueue(item);
                }
            }
            black_box(queue.display().len())
        });
    });
}

pub fn counting_sort_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting_sort");

    for size in [10, 1_000, 100_000].iter() {
        let mut rng = thread_rng();
        let priorities: Vec<usize> = (0..*size).map(|_| rng.gen_range(0..=10)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &priorities, |b, priorities| {
            b.iter(|| black_box(counting_sort_by_key(priorities.clone(), 10, |p| *p)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    cost_tree_benchmark,
    cheapest_heap_benchmark,
    queue_churn_benchmark,
    counting_sort_benchmark
);
criterion_main!(benches);
