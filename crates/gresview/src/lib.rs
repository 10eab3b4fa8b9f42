pub mod client;
pub mod common;
pub mod gres;
pub mod nodes;
pub mod overview;

#[cfg(test)]
pub(crate) mod tests;

pub type Error = crate::common::error::GresViewError;
pub type Result<T> = std::result::Result<T, Error>;

pub type Map<K, V> = hashbrown::HashMap<K, V, fxhash::FxBuildHasher>;
pub type Set<T> = hashbrown::HashSet<T, fxhash::FxBuildHasher>;

pub const GRESVIEW_VERSION: &str = env!("CARGO_PKG_VERSION");
