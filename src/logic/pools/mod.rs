pub mod pool;
pub mod pool_key;

pub use pool::{Fee, Pool, PoolSnapshot, PoolWrapper};
pub use pool_key::{FeeTier, PoolKey};
