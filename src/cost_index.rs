// Binary search tree of bookings keyed by cost
// Backs the "sorted by rating" listing; the key is the booking cost

use crate::booking::CostedBooking;
use tracing::debug;

struct CostNode {
    booking: CostedBooking,
    left: Option<Box<CostNode>>,
    right: Option<Box<CostNode>>,
}

impl CostNode {
    fn leaf(booking: CostedBooking) -> Box<Self> {
        Box::new(Self {
            booking,
            left: None,
            right: None,
        })
    }
}

// Unbalanced: sorted input degrades the tree to a list
#[derive(Default)]
pub struct CostTree {
    root: Option<Box<CostNode>>,
    len: usize,
}

impl CostTree {
    pub fn new() -> Self {
        Self::default()
    }

    // Strictly cheaper goes left, equal or dearer goes right
    pub fn insert(&mut self, booking: CostedBooking) {
        let cost = booking.cost;
        let mut depth = 1;
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if cost < node.booking.cost {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;
        }
        *slot = Some(CostNode::leaf(booking));

        debug!(cost, depth, "Inserted booking into cost tree");
        self.len += 1;
    }

    // Left, node, right: bookings ascending by cost
    pub fn inorder(&self) -> Vec<&CostedBooking> {
        let mut bookings = Vec::with_capacity(self.len);
        let mut pending: Vec<&CostNode> = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                pending.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = pending.pop() else {
                break;
            };
            bookings.push(&node.booking);
            current = node.right.as_deref();
        }
        bookings
    }

    // Longest root-to-leaf path, counted in nodes
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&CostNode, usize)> =
            self.root.as_deref().map(|node| (node, 1)).into_iter().collect();

        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                pending.push((child, depth + 1));
            }
        }
        deepest
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// Unlinks nodes one at a time so a degenerate spine never drops recursively
impl Drop for CostTree {
    fn drop(&mut self) {
        let mut pending: Vec<Box<CostNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}
