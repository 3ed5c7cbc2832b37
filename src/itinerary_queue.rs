// Fixed-capacity circular queue of itinerary entries

use std::num::NonZeroUsize;
use tracing::debug;

pub struct CircularQueue<T> {
    slots: Vec<Option<T>>,
    // Both None when the queue is empty
    front: Option<usize>,
    rear: Option<usize>,
}

impl<T> CircularQueue<T> {
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        let mut slots = Vec::with_capacity(capacity.get());
        slots.resize_with(capacity.get(), || None);
        Self {
            slots,
            front: None,
            rear: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    // Full when the slot after rear is front
    pub fn is_full(&self) -> bool {
        match (self.front, self.rear) {
            (Some(front), Some(rear)) => (rear + 1) % self.capacity() == front,
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    pub fn len(&self) -> usize {
        match (self.front, self.rear) {
            (Some(front), Some(rear)) => (rear + self.capacity() - front) % self.capacity() + 1,
            _ => 0,
        }
    }

    // Hands the item back when the queue is full
    pub fn enqueue(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }

        let rear = match self.rear {
            Some(rear) => (rear + 1) % self.capacity(),
            None => {
                self.front = Some(0);
                0
            }
        };
        self.rear = Some(rear);
        self.slots[rear] = Some(item);
        debug!(front = ?self.front, rear, "Enqueued itinerary entry");
        Ok(())
    }

    pub fn dequeue(&mut self) -> Option<T> {
        let front = self.front?;
        let item = self.slots[front].take();

        if self.rear == Some(front) {
            self.front = None;
            self.rear = None;
        } else {
            self.front = Some((front + 1) % self.capacity());
        }
        debug!(front = ?self.front, rear = ?self.rear, "Dequeued itinerary entry");
        item
    }

    // Occupied slots from front to rear, wrapping around the end of the buffer
    pub fn display(&self) -> Vec<&T> {
        let Some(front) = self.front else {
            return Vec::new();
        };

        (0..self.len())
            .filter_map(|offset| self.slots[(front + offset) % self.capacity()].as_ref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(capacity: usize) -> CircularQueue<u32> {
        CircularQueue::with_capacity(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn test_empty_queue() {
        let mut q = queue(5);
        assert!(q.is_empty());
        assert!(!q.is_full());
        assert_eq!(q.len(), 0);
        assert!(q.display().is_empty());
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn test_sixth_insert_fails() {
        let mut q = queue(5);
        for i in 0..5 {
            assert!(q.enqueue(i).is_ok());
        }
        assert!(q.is_full());
        assert_eq!(q.enqueue(5), Err(5));
        assert_eq!(q.len(), 5);

        assert_eq!(q.dequeue(), Some(0));
        assert!(q.enqueue(5).is_ok());
        assert_eq!(q.display(), vec![&1, &2, &3, &4, &5]);
    }

    #[test]
    fn test_display_after_removing_two() {
        let mut q = queue(5);
        for i in 10..15 {
            q.enqueue(i).unwrap();
        }
        assert_eq!(q.dequeue(), Some(10));
        assert_eq!(q.dequeue(), Some(11));
        assert_eq!(q.display(), vec![&12, &13, &14]);
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn test_wraps_around() {
        let mut q = queue(3);
        q.enqueue(1).unwrap();
        q.enqueue(2).unwrap();
        q.enqueue(3).unwrap();
        q.dequeue();
        q.dequeue();
        q.enqueue(4).unwrap();
        q.enqueue(5).unwrap();

        // rear has wrapped behind front
        assert_eq!(q.display(), vec![&3, &4, &5]);
        assert!(q.is_full());
    }

    #[test]
    fn test_last_dequeue_resets_indices() {
        let mut q = queue(2);
        q.enqueue(7).unwrap();
        assert_eq!(q.dequeue(), Some(7));
        assert!(q.is_empty());

        // first insert after emptying starts again at slot 0
        q.enqueue(8).unwrap();
        assert_eq!(q.front, Some(0));
        assert_eq!(q.rear, Some(0));
    }

    #[test]
    fn test_capacity_one() {
        let mut q = queue(1);
        q.enqueue(1).unwrap();
        assert!(q.is_full());
        assert_eq!(q.enqueue(2), Err(2));
        assert_eq!(q.dequeue(), Some(1));
        assert!(q.enqueue(2).is_ok());
    }
}
