//! Consistent Hash Ring
//!
//! Maps keys to peers with virtual replicas so ownership moves little when
//! peers join or leave.

use std::collections::HashMap;

/// Hash function applied to peer replica names and keys.
pub type HashFn = fn(&[u8]) -> u32;

// == Hash Ring ==
/// Consistent hash ring of peer identifiers.
#[derive(Debug, Clone)]
pub struct HashRing {
    hash: HashFn,
    /// Virtual nodes per peer
    replicas: usize,
    /// Sorted ring positions
    keys: Vec<u32>,
    /// Ring position to owning peer
    hash_map: HashMap<u32, String>,
}

impl HashRing {
    // == Constructor ==
    /// Creates an empty ring. Defaults to CRC-32 (IEEE) when `hash` is `None`.
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        Self {
            hash: hash.unwrap_or(crc32fast::hash),
            replicas,
            keys: Vec::new(),
            hash_map: HashMap::new(),
        }
    }

    // == Add ==
    /// Places `replicas` virtual nodes for each peer on the ring.
    ///
    /// Replica `i` of peer `p` hashes the string `"{i}{p}"`. When two replicas land
    /// on the same position the peer added last owns it.
    pub fn add<I, S>(&mut self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for peer in peers {
            let peer = peer.as_ref();
            for i in 0..self.replicas {
                let hash = (self.hash)(format!("{}{}", i, peer).as_bytes());
                self.keys.push(hash);
                self.hash_map.insert(hash, peer.to_string());
            }
        }
        self.keys.sort_unstable();
        self.keys.dedup();
    }

    // == Remove ==
    /// Drops every virtual node owned by `peer`.
    pub fn remove(&mut self, peer: &str) {
        let hash_map = &mut self.hash_map;
        self.keys.retain(|hash| {
            let owned = hash_map.get(hash).is_some_and(|owner| owner == peer);
            if owned {
                hash_map.remove(hash);
            }
            !owned
        });
    }

    // == Get ==
    /// Returns the peer owning `key`: the first ring position at or after the key's
    /// hash, wrapping around to the start. `None` when the ring is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let hash = (self.hash)(key.as_bytes());
        let idx = self.keys.partition_point(|&k| k < hash);
        let position = self.keys[idx % self.keys.len()];
        self.hash_map.get(&position).map(String::as_str)
    }

    // == Length ==
    /// Number of virtual nodes on the ring.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
