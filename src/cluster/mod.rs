//! Cluster Module
//!
//! Key ownership across peers: the consistent hash ring, the peer capability
//! traits, and peer address validation.

mod addr;
mod peers;
mod ring;

pub use addr::check_addr;
pub use peers::{PeerGetter, PeerPicker};
pub use ring::{HashFn, HashRing};
