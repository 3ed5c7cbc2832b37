// Min-heap of bookings, exposing only the cheapest one

use crate::booking::CostedBooking;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::debug;

// Heap entry with an explicit ordering: cost, then destination name, then passenger name, then phone
#[derive(Debug, Clone)]
struct ByCost(CostedBooking);

impl ByCost {
    fn key(&self) -> (&str, &str, &str) {
        (
            self.0.destination.name(),
            self.0.name.as_str(),
            self.0.phone.as_str(),
        )
    }
}

impl Ord for ByCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .cost
            .total_cmp(&other.0.cost)
            .then_with(|| self.key().cmp(&other.key()))
    }
}

impl PartialOrd for ByCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ByCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByCost {}

// Grows only: there is no pop, the cheapest booking stays on top until a cheaper one arrives
#[derive(Default)]
pub struct CheapestHeap {
    heap: BinaryHeap<Reverse<ByCost>>,
}

impl CheapestHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, booking: CostedBooking) {
        debug!(cost = booking.cost, size = self.heap.len() + 1, "Adding booking to min-heap");
        self.heap.push(Reverse(ByCost(booking)));
    }

    // Peek, not pop
    pub fn get_cheapest(&self) -> Option<&CostedBooking> {
        self.heap.peek().map(|Reverse(entry)| &entry.0)
    }

    // Every booking in heap storage order
    pub fn show_all(&self) -> Vec<String> {
        self.heap
            .iter()
            .map(|Reverse(entry)| entry.0.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Destination;

    fn booking(cost: f64, destination: Destination, name: &str) -> CostedBooking {
        CostedBooking {
            cost,
            destination,
            name: name.to_string(),
            phone: "0731234567".parse().unwrap(),
        }
    }

    #[test]
    fn test_empty_heap() {
        let heap = CheapestHeap::new();
        assert!(heap.get_cheapest().is_none());
        assert!(heap.show_all().is_empty());
    }

    #[test]
    fn test_cheapest_is_peeked() {
        let mut heap = CheapestHeap::new();
        heap.add(booking(500.0, Destination::KigaliGenocideMemorial, "a"));
        heap.add(booking(120_000.0, Destination::NyungweForestNationalPark, "b"));
        heap.add(booking(50_000.0, Destination::LakeKivu, "c"));

        let first = heap.get_cheapest().cloned();
        let second = heap.get_cheapest().cloned();
        assert_eq!(first.as_ref().map(|b| b.cost), Some(500.0));
        assert_eq!(first, second);
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_root_changes_only_on_cheaper_add() {
        let mut heap = CheapestHeap::new();
        heap.add(booking(50_000.0, Destination::LakeKivu, "c"));
        heap.add(booking(400_000.0, Destination::VolcanoesNationalPark, "v"));
        assert_eq!(heap.get_cheapest().map(|b| b.name.as_str()), Some("c"));

        heap.add(booking(10.0, Destination::ButareMuseum, "m"));
        assert_eq!(heap.get_cheapest().map(|b| b.name.as_str()), Some("m"));
    }

    #[test]
    fn test_ties_broken_by_destination_name() {
        let mut heap = CheapestHeap::new();
        heap.add(booking(1000.0, Destination::LakeKivu, "z"));
        heap.add(booking(1000.0, Destination::AkageraNationalPark, "y"));
        heap.add(booking(1000.0, Destination::ButareMuseum, "x"));

        assert_eq!(
            heap.get_cheapest().map(|b| b.destination),
            Some(Destination::AkageraNationalPark)
        );
    }

    #[test]
    fn test_show_all_lists_every_booking() {
        let mut heap = CheapestHeap::new();
        heap.add(booking(2.0, Destination::LakeKivu, "a"));
        heap.add(booking(1.0, Destination::LakeKivu, "b"));

        let mut rows = heap.show_all();
        rows.sort();
        assert_eq!(
            rows,
            vec![
                "a (0731234567) - Lake Kivu - 2.0 RWF".to_string(),
                "b (0731234567) - Lake Kivu - 1.0 RWF".to_string(),
            ]
        );
    }
}
