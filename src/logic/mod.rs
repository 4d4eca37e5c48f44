//! Logic Layer - Quote Engine
//!
//! This layer is responsible for:
//! - The token/pool graph built from a caller's snapshot
//! - Depth-bounded path enumeration
//! - Exact constant-product pricing along a path
//! - Price impact scoring and route selection

pub mod amount_calculator;
pub mod config;
pub mod error;
pub mod graph;
pub mod pathfinder;
pub mod pools;
pub mod price_impact;
pub mod quote_service;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export key components from the logic layer
pub use amount_calculator::{amount_in, amount_in_along, amount_out, amount_out_along};
pub use config::{RouterConfigRoot, RouterConfigSection};
pub use error::QuoteError;
pub use graph::{FastHashMap, Hop, PoolGraph, SwapPath, SwapPathHash};
pub use pathfinder::{PathEnumerator, find_all_paths};
pub use pools::{Fee, FeeTier, Pool, PoolKey, PoolSnapshot, PoolWrapper};
pub use price_impact::{
    PRICE_IMPACT_BLOCKED, PRICE_IMPACT_HIGH, PRICE_IMPACT_LOW, PRICE_IMPACT_MEDIUM, PRICE_IMPACT_REQUIRES_CONFIRMATION, PriceImpactSeverity,
    path_spot_price,
};
pub use quote_service::QuoteService;
pub use types::{ExactOutputRequest, PriceMap, Quote, QuoteRequest, QuoteResponse};
