//! LRU Cache Module
//!
//! Byte-bounded recency cache used as the eviction engine of every group.

use std::collections::HashMap;
use std::fmt;

// == Value Trait ==
/// Anything stored in an [`LruCache`] reports its own size in bytes.
pub trait Value {
    /// Size of the value in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Value for String {
    fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

impl Value for Vec<u8> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }
}

/// Callback invoked with every entry removed by eviction.
pub type OnEvicted<V> = Box<dyn FnMut(&str, &V) + Send>;

/// Arena slot; `prev` points towards the most recent end.
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Cache ==
/// Byte-bounded LRU cache.
///
/// Entries live in an arena of slots linked by index:
/// - `head` = Most recently used
/// - `tail` = Least recently used
///
/// The resident size of an entry is `key.len() + value.len()`. Not thread-safe;
/// see [`CacheStore`](crate::cache::CacheStore) for the locked wrapper.
pub struct LruCache<V> {
    /// Byte budget, 0 = unbounded
    max_bytes: usize,
    /// Bytes currently resident
    used: usize,
    slots: Vec<Option<Node<V>>>,
    /// Vacant slot indices
    free: Vec<usize>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    on_evicted: Option<OnEvicted<V>>,
}

impl<V: Value> LruCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_bytes` - Byte budget; 0 disables eviction entirely
    /// * `on_evicted` - Optional callback run for each evicted entry
    pub fn new(max_bytes: usize, on_evicted: Option<OnEvicted<V>>) -> Self {
        Self {
            max_bytes,
            used: 0,
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            on_evicted,
        }
    }

    // == Get ==
    /// Looks up a key and marks it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.move_to_front(idx);
        self.node(idx).map(|node| &node.value)
    }

    // == Add ==
    /// Inserts or replaces a value, then evicts from the tail until the
    /// budget holds again.
    ///
    /// An entry larger than the whole budget evicts everything else and then
    /// itself, leaving the cache empty.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(&idx) = self.index.get(&key) {
            let new_len = value.len();
            if let Some(node) = self.node_mut(idx) {
                let old = std::mem::replace(&mut node.value, value);
                self.used = self.used - old.len() + new_len;
            }
            self.move_to_front(idx);
        } else {
            self.used += key.len() + value.len();
            let node = Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            };
            let idx = match self.free.pop() {
                Some(idx) => {
                    self.slots[idx] = Some(node);
                    idx
                }
                None => {
                    self.slots.push(Some(node));
                    self.slots.len() - 1
                }
            };
            self.index.insert(key, idx);
            self.push_front(idx);
        }

        while self.max_bytes != 0 && self.used > self.max_bytes {
            if self.remove_oldest().is_none() {
                break;
            }
        }
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry and returns it.
    ///
    /// Returns None if the cache is empty.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let idx = self.tail?;
        self.unlink(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        self.index.remove(&node.key);
        self.used -= node.key.len() + node.value.len();

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(&node.key, &node.value);
        }
        Some((node.key, node.value))
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without touching it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.tail
            .and_then(|idx| self.node(idx))
            .map(|node| node.key.as_str())
    }

    /// Checks residency without changing recency order.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::successors(self.head, move |&idx| self.node(idx).and_then(|n| n.next))
            .filter_map(move |idx| self.node(idx).map(|node| node.key.as_str()))
    }

    // == Length ==
    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Bytes currently accounted to resident entries.
    pub fn used_bytes(&self) -> usize {
        self.used
    }

    pub fn capacity(&self) -> usize {
        self.max_bytes
    }

    // == Linking ==
    fn node(&self, idx: usize) -> Option<&Node<V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<V>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head != Some(idx) {
            self.unlink(idx);
            self.push_front(idx);
        }
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|h| self.node_mut(h)) {
            Some(head) => head.prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node_mut(idx) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };
        match prev.and_then(|p| self.node_mut(p)) {
            Some(node) => node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.node_mut(n)) {
            Some(node) => node.prev = prev,
            None => self.tail = prev,
        }
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("used", &self.used)
            .field("entries", &self.index.len())
            .finish()
    }
}
