//! Process-wide registry of named groups.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{info, warn};

use super::{Getter, Group};

static GROUPS: Lazy<RwLock<HashMap<String, Arc<Group>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Creates a group and registers it under `name`.
///
/// Registering a name twice replaces the earlier group; callers are responsible
/// for keeping names unique.
pub fn new_group(name: &str, cache_bytes: usize, getter: impl Getter + 'static) -> Arc<Group> {
    let group = Arc::new(Group::new(name, cache_bytes, getter));
    let previous = GROUPS.write().insert(name.to_string(), group.clone());
    if previous.is_some() {
        warn!(group = name, "replaced existing group with the same name");
    } else {
        info!(group = name, cache_bytes, "registered group");
    }
    group
}

/// Looks up a previously registered group.
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    GROUPS.read().get(name).cloned()
}
