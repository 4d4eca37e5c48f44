pub mod pool_graph;
pub mod swap_path;
pub mod swap_path_hash;

pub use pool_graph::{FastHashMap, PoolEdge, PoolGraph, TokenNode};
pub use swap_path::{Hop, SwapPath, generate_swap_path_hash};
pub use swap_path_hash::{SwapPathHash, SwapPathHasher};
