//! LRU Cache Module
//!
//! Byte-weighted Least Recently Used store used for cache eviction.

use std::collections::HashMap;
use std::fmt;

// == Value Trait ==
/// A value that can be weighed for eviction accounting.
pub trait Value {
    /// Memory weight of the value, usually its byte length.
    fn len(&self) -> usize;
}

/// Callback fired synchronously for every evicted entry.
pub type OnEvicted<V> = Box<dyn FnMut(&str, &V) + Send>;

// == List Node ==
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Cache ==
/// Weight-bounded LRU store.
///
/// Entries are linked in recency order:
/// - Head = Least recently used
/// - Tail = Most recently used
///
/// The weight of an entry is `value.len() + key.len()`. Whenever `max_bytes` is
/// non-zero, the total weight is brought back under it after every `add`; a
/// `max_bytes` of zero means unbounded. Not safe for concurrent use.
pub struct LruCache<V> {
    /// Maximum total weight, 0 = unbounded
    max_bytes: usize,
    /// Current total weight
    nbytes: usize,
    /// Node slots, `None` marks a free slot
    nodes: Vec<Option<Node<V>>>,
    /// Free slot indices available for reuse
    free: Vec<usize>,
    /// Key to slot index
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    on_evicted: Option<OnEvicted<V>>,
}

impl<V: Value> LruCache<V> {
    // == Constructor ==
    /// Creates an empty store bounded by `max_bytes` (0 = unbounded).
    pub fn new(max_bytes: usize, on_evicted: Option<OnEvicted<V>>) -> Self {
        Self {
            max_bytes,
            nbytes: 0,
            nodes: Vec::new(),
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
        self.move_to_back(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    // == Add ==
    /// Inserts or updates a key, then evicts from the head until the weight fits.
    ///
    /// Eviction runs after the insert, so a single entry heavier than `max_bytes`
    /// evicts everything else and then itself.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(&idx) = self.index.get(&key) {
            self.move_to_back(idx);
            if let Some(node) = self.nodes[idx].as_mut() {
                self.nbytes = self.nbytes + value.len() - node.value.len();
                node.value = value;
            }
        } else {
            self.nbytes += value.len() + key.len();
            let idx = self.alloc(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.push_back(idx);
            self.index.insert(key, idx);
        }

        while self.max_bytes != 0 && self.nbytes > self.max_bytes {
            self.remove_oldest();
        }
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry, if any.
    ///
    /// Weight is released before the eviction callback fires.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let idx = self.head?;
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free.push(idx);
        self.index.remove(&node.key);
        self.nbytes -= node.value.len() + node.key.len();

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(&node.key, &node.value);
        }
        Some((node.key, node.value))
    }

    // == Length ==
    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Current total weight.
    pub fn bytes(&self) -> usize {
        self.nbytes
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    // == Linked List Plumbing ==
    fn alloc(&mut self, node: Node<V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.nodes[idx].as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.nodes[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.nodes[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn push_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(t) => {
                if let Some(node) = self.nodes[t].as_mut() {
                    node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    fn move_to_back(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_back(idx);
    }

    /// Keys from least to most recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.nodes[idx].as_ref().expect("linked slot is occupied");
            keys.push(node.key.clone());
            cursor = node.next;
        }
        keys
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("nbytes", &self.nbytes)
            .field("len", &self.index.len())
            .finish()
    }
}
