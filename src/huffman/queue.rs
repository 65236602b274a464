use crate::error::{Error, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Queue entry ordered by (weight, insertion sequence)
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl<T> Eq for Entry<T> {}
impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight).then(self.seq.cmp(&other.seq))
    }
}

/// Ascending-weight priority queue
///
/// Entries of equal weight leave in the order they arrived.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity), next_seq: 0 }
    }

    pub fn enqueue(&mut self, item: T, weight: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { weight, seq, item }));
    }

    /// Remove the lowest-weight entry, handing its item to the caller
    pub fn dequeue(&mut self) -> Result<(T, u64)> {
        let Reverse(entry) = self.heap.pop().ok_or(Error::QueueUnderflow)?;
        Ok((entry.item, entry.weight))
    }

    /// Item at the head of the queue
    pub fn peek_item(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(entry)| &entry.item)
    }

    /// Weight at the head of the queue
    pub fn peek_weight(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(entry)| entry.weight)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every queued item
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_non_decreasing() {
        let weights = [9u64, 3, 7, 3, 1, 12, 0, 7, 7, 5, 2, 100, 1];
        let mut queue = PriorityQueue::new();
        for (i, &w) in weights.iter().enumerate() {
            queue.enqueue(i, w);
        }
        assert_eq!(queue.len(), weights.len());

        let mut drained = Vec::new();
        while !queue.is_empty() {
            drained.push(queue.dequeue().unwrap().1);
        }
        let mut sorted = weights.to_vec();
        sorted.sort();
        assert_eq!(drained, sorted);
    }

    #[test]
    fn test_ties_are_fifo() {
        let mut queue = PriorityQueue::new();
        queue.enqueue('a', 5);
        queue.enqueue('b', 2);
        queue.enqueue('c', 5);
        queue.enqueue('d', 2);
        queue.enqueue('e', 5);

        let order: Vec<char> = std::iter::from_fn(|| queue.dequeue().ok().map(|(c, _)| c)).collect();
        assert_eq!(order, vec!['b', 'd', 'a', 'c', 'e']);
    }

    #[test]
    fn test_peek() {
        let mut queue = PriorityQueue::new();
        assert_eq!(queue.peek_item(), None);
        assert_eq!(queue.peek_weight(), None);

        queue.enqueue("heavy", 10);
        queue.enqueue("light", 1);
        assert_eq!(queue.peek_item(), Some(&"light"));
        assert_eq!(queue.peek_weight(), Some(1));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_underflow() {
        let mut queue: PriorityQueue<u8> = PriorityQueue::new();
        assert!(matches!(queue.dequeue(), Err(Error::QueueUnderflow)));
    }

    #[test]
    fn test_clear_drops_items() {
        use std::rc::Rc;

        let shared = Rc::new(());
        let mut queue = PriorityQueue::new();
        for w in 0..4 {
            queue.enqueue(Rc::clone(&shared), w);
        }
        assert_eq!(Rc::strong_count(&shared), 5);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(Rc::strong_count(&shared), 1);
    }
}
