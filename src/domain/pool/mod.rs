//! Pool state normalization

pub mod pool_data;
pub mod pool_keys;
pub mod pool_record;

pub use pool_data::PoolData;
pub use pool_keys::{normalize_pool_keys, PoolKeys, PoolLayout};
pub use pool_record::{AddressRepr, RawPoolRecord};
