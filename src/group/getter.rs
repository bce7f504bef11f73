//! Loader capability used on a cache miss.

use async_trait::async_trait;

use crate::error::Result;

/// Loads the value for a key from the source of truth.
///
/// Called at most once per key for any burst of concurrent misses. Errors are
/// returned unchanged to every caller of that burst.
#[async_trait]
pub trait Getter: Send + Sync {
    async fn get(&self, key: &str) -> Result<Vec<u8>>;
}

/// Adapter that lets a plain function act as a [`Getter`].
///
/// ```ignore
/// let getter = GetterFunc(|key: &str| Ok(key.as_bytes().to_vec()));
/// ```
pub struct GetterFunc<F>(pub F);

#[async_trait]
impl<F> Getter for GetterFunc<F>
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync,
{
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        (self.0)(key)
    }
}
