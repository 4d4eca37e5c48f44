// Two layers: the quote engine and its shared primitives
pub mod logic; // Logic Layer: graph, path enumeration, pricing, route selection

// Common utilities and types
pub mod utils;

// Re-export key components from each layer
pub use logic::{
    ExactOutputRequest, Fee, FeeTier, PathEnumerator, Pool, PoolGraph, PoolKey, PoolSnapshot, PoolWrapper, PriceImpactSeverity, PriceMap, Quote,
    QuoteError, QuoteRequest, QuoteResponse, QuoteService, RouterConfigSection, SwapPath, SwapPathHash,
};
pub use utils::{ConfigLoader, ConfigLoaderSync, LoadConfigError, Token, TokenId, TokenWrapper};
