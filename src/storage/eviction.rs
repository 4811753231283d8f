use std::collections::HashMap;

use crate::types::PageId;

/*
 * Frequency-bucketed LFU index
 *
 *   first
 *     │
 *     ▼
 *   [freq 1] ──► [freq 2] ──► [freq 5] ──► None
 *    k3 k7        k1           k4 k0
 *
 * Buckets form a doubly linked list ordered by strictly increasing access
 * count. Each bucket keeps its keys in insertion order as a doubly linked
 * list threaded through `links`. The eviction victim is always the head key
 * of the first bucket. Buckets live in an arena and are addressed by index;
 * freed indexes are reused.
 */

#[derive(Debug)]
struct Bucket {
    frequency: u64,
    head: Option<PageId>,
    tail: Option<PageId>,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Link {
    bucket: usize,
    prev: Option<PageId>,
    next: Option<PageId>,
}

#[derive(Debug, Default)]
pub struct FrequencyList {
    buckets: Vec<Bucket>,
    free_buckets: Vec<usize>,
    first: Option<usize>,
    links: HashMap<PageId, Link>,
}

impl FrequencyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, key: PageId) -> bool {
        self.links.contains_key(&key)
    }

    pub fn frequency(&self, key: PageId) -> Option<u64> {
        self.links
            .get(&key)
            .map(|link| self.buckets[link.bucket].frequency)
    }

    /// Tracks `key` at frequency 1, behind any key already at that frequency.
    /// A key that is already tracked is promoted instead.
    pub fn insert(&mut self, key: PageId) {
        if self.touch(key) {
            return;
        }

        let first = self.first;
        let bucket = match first {
            Some(first) if self.buckets[first].frequency == 1 => first,
            _ => self.alloc_bucket(1, None, first),
        };
        self.push_key(bucket, key);
    }

    /// Moves `key` to the bucket one frequency higher. Returns false if the
    /// key is not tracked.
    pub fn touch(&mut self, key: PageId) -> bool {
        let Some(bucket) = self.unlink_key(key) else {
            return false;
        };

        let frequency = self.buckets[bucket].frequency + 1;
        let next = self.buckets[bucket].next;
        let anchor = if self.buckets[bucket].head.is_none() {
            let prev = self.buckets[bucket].prev;
            self.release_bucket(bucket);
            prev
        } else {
            Some(bucket)
        };

        let target = match next {
            Some(next) if self.buckets[next].frequency == frequency => next,
            _ => self.alloc_bucket(frequency, anchor, next),
        };
        self.push_key(target, key);
        true
    }

    /// Removes and returns the earliest-inserted key of the lowest frequency.
    pub fn pop_least_frequent(&mut self) -> Option<PageId> {
        let first = self.first?;
        let key = self.buckets[first].head?;
        self.unlink_key(key);
        if self.buckets[first].head.is_none() {
            self.release_bucket(first);
        }
        Some(key)
    }

    /// Peeks at the key `pop_least_frequent` would return.
    pub fn least_frequent(&self) -> Option<PageId> {
        self.first.and_then(|first| self.buckets[first].head)
    }

    fn alloc_bucket(&mut self, frequency: u64, prev: Option<usize>, next: Option<usize>) -> usize {
        let bucket = Bucket {
            frequency,
            head: None,
            tail: None,
            prev,
            next,
        };
        let index = match self.free_buckets.pop() {
            Some(index) => {
                self.buckets[index] = bucket;
                index
            }
            None => {
                self.buckets.push(bucket);
                self.buckets.len() - 1
            }
        };

        match prev {
            Some(prev) => self.buckets[prev].next = Some(index),
            None => self.first = Some(index),
        }
        if let Some(next) = next {
            self.buckets[next].prev = Some(index);
        }
        index
    }

    fn release_bucket(&mut self, index: usize) {
        let (prev, next) = (self.buckets[index].prev, self.buckets[index].next);
        match prev {
            Some(prev) => self.buckets[prev].next = next,
            None => self.first = next,
        }
        if let Some(next) = next {
            self.buckets[next].prev = prev;
        }
        self.free_buckets.push(index);
    }

    fn push_key(&mut self, bucket: usize, key: PageId) {
        let tail = self.buckets[bucket].tail;
        self.links.insert(
            key,
            Link {
                bucket,
                prev: tail,
                next: None,
            },
        );

        match tail {
            Some(tail) => {
                if let Some(link) = self.links.get_mut(&tail) {
                    link.next = Some(key);
                }
            }
            None => self.buckets[bucket].head = Some(key),
        }
        self.buckets[bucket].tail = Some(key);
    }

    /// Detaches `key` from its bucket's key list and returns that bucket.
    fn unlink_key(&mut self, key: PageId) -> Option<usize> {
        let link = self.links.remove(&key)?;

        match link.prev {
            Some(prev) => {
                if let Some(prev_link) = self.links.get_mut(&prev) {
                    prev_link.next = link.next;
                }
            }
            None => self.buckets[link.bucket].head = link.next,
        }
        match link.next {
            Some(next) => {
                if let Some(next_link) = self.links.get_mut(&next) {
                    next_link.prev = link.prev;
                }
            }
            None => self.buckets[link.bucket].tail = link.prev,
        }

        Some(link.bucket)
    }
}
