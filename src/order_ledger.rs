// Bounded doubly-linked list of orders
// Nodes live in an index arena; prev/next are slot indices

use crate::booking::{Activity, Destination, Order};
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

pub struct DoublyLinkedList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    size: usize,
    max_size: usize,
}

impl<T> DoublyLinkedList<T> {
    pub fn with_max_size(max_size: NonZeroUsize) -> Self {
        Self {
            slots: Vec::with_capacity(max_size.get()),
            free: Vec::new(),
            head: None,
            tail: None,
            size: 0,
            max_size: max_size.get(),
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_full(&self) -> bool {
        self.size == self.max_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    // Appends at the tail; hands the value back when the list is full
    pub fn push_back(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        let node = Node {
            value,
            prev: self.tail,
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                index
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(tail_node) = self.slots[tail].as_mut() {
                    tail_node.next = Some(index);
                }
            }
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.size += 1;
        Ok(())
    }

    // Unlinks the first node from the head that matches
    pub fn remove_first<F>(&mut self, mut matches: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut current = self.head;
        while let Some(index) = current {
            let node = self.slots[index].as_ref()?;
            if matches(&node.value) {
                return self.unlink(index);
            }
            current = node.next;
        }
        None
    }

    fn unlink(&mut self, index: usize) -> Option<T> {
        let node = self.slots[index].take()?;

        match node.prev {
            Some(prev) => {
                if let Some(prev_node) = self.slots[prev].as_mut() {
                    prev_node.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(next_node) = self.slots[next].as_mut() {
                    next_node.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        self.free.push(index);
        self.size -= 1;
        debug!(index, size = self.size, "Unlinked node");
        Some(node.value)
    }

    // Head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            forward: true,
        }
    }

    // Tail to head
    pub fn iter_rev(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.tail,
            forward: false,
        }
    }
}

pub struct Iter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    current: Option<usize>,
    forward: bool,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.slots[self.current?].as_ref()?;
        self.current = if self.forward { node.next } else { node.prev };
        Some(&node.value)
    }
}

// Order book capped at a fixed number of orders
pub struct OrderLedger {
    orders: DoublyLinkedList<Order>,
}

impl OrderLedger {
    pub fn with_max_size(max_size: NonZeroUsize) -> Self {
        Self {
            orders: DoublyLinkedList::with_max_size(max_size),
        }
    }

    pub fn insert_order(&mut self, order: Order) -> Result<(), Order> {
        let destination = order.destination;
        let activity = order.activity.clone();
        match self.orders.push_back(order) {
            Ok(()) => {
                info!(%destination, %activity, size = self.orders.len(), "Order added");
                Ok(())
            }
            Err(order) => {
                warn!(max_size = self.orders.max_size(), "Maximum order limit reached");
                Err(order)
            }
        }
    }

    // First order matching both destination and activity
    pub fn remove_order(&mut self, destination: Destination, activity: &Activity) -> Option<Order> {
        let removed = self
            .orders
            .remove_first(|order| order.destination == destination && &order.activity == activity);

        match &removed {
            Some(_) => info!(%destination, %activity, "Order removed"),
            None => warn!(%destination, %activity, "Order not found"),
        }
        removed
    }

    pub fn is_full(&self) -> bool {
        self.orders.is_full()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Order> {
        self.orders.iter()
    }

    pub fn iter_rev(&self) -> Iter<'_, Order> {
        self.orders.iter_rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(max: usize) -> DoublyLinkedList<u32> {
        DoublyLinkedList::with_max_size(NonZeroUsize::new(max).unwrap())
    }

    fn order(destination: Destination, activity: Activity, username: &str) -> Order {
        Order {
            destination,
            activity,
            username: username.to_string(),
            phone: "0721234567".parse().unwrap(),
        }
    }

    #[test]
    fn test_sixth_insert_fails() {
        let mut l = list(5);
        for i in 0..5 {
            assert!(l.push_back(i).is_ok());
        }
        assert!(l.is_full());
        assert_eq!(l.push_back(5), Err(5));
        assert_eq!(l.len(), 5);
    }

    #[test]
    fn test_middle_removal_relinks_neighbours() {
        let mut l = list(5);
        for i in 1..=5 {
            l.push_back(i).unwrap();
        }

        assert_eq!(l.remove_first(|v| *v == 3), Some(3));
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4, 5]);
        assert_eq!(l.iter_rev().copied().collect::<Vec<_>>(), vec![5, 4, 2, 1]);
        assert_eq!(l.len(), 4);
    }

    #[test]
    fn test_endpoint_removal_moves_head_and_tail() {
        let mut l = list(5);
        for i in 1..=3 {
            l.push_back(i).unwrap();
        }

        assert_eq!(l.remove_first(|v| *v == 1), Some(1));
        assert_eq!(l.remove_first(|v| *v == 3), Some(3));
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(l.iter_rev().copied().collect::<Vec<_>>(), vec![2]);

        assert_eq!(l.remove_first(|v| *v == 2), Some(2));
        assert!(l.is_empty());
        assert_eq!(l.iter().next(), None);
        assert_eq!(l.iter_rev().next(), None);
    }

    #[test]
    fn test_missing_value_leaves_list_unchanged() {
        let mut l = list(3);
        l.push_back(1).unwrap();
        l.push_back(2).unwrap();

        assert_eq!(l.remove_first(|v| *v == 9), None);
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut l = list(2);
        l.push_back(1).unwrap();
        l.push_back(2).unwrap();
        l.remove_first(|v| *v == 1);
        l.push_back(3).unwrap();

        assert_eq!(l.slots.len(), 2);
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(l.iter_rev().copied().collect::<Vec<_>>(), vec![3, 2]);
    }

    #[test]
    fn test_remove_order_first_match_only() {
        let mut ledger = OrderLedger::with_max_size(NonZeroUsize::new(5).unwrap());
        ledger
            .insert_order(order(Destination::LakeKivu, Activity::Swimming, "amy"))
            .unwrap();
        ledger
            .insert_order(order(Destination::LakeKivu, Activity::Hiking, "ben"))
            .unwrap();
        ledger
            .insert_order(order(Destination::LakeKivu, Activity::Swimming, "cal"))
            .unwrap();

        let removed = ledger.remove_order(Destination::LakeKivu, &Activity::Swimming);
        assert_eq!(removed.map(|o| o.username), Some("amy".to_string()));

        let users: Vec<&str> = ledger.iter().map(|o| o.username.as_str()).collect();
        assert_eq!(users, vec!["ben", "cal"]);

        assert!(ledger
            .remove_order(Destination::AkageraNationalPark, &Activity::Swimming)
            .is_none());
        assert_eq!(ledger.len(), 2);
    }
}
