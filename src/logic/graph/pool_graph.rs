use crate::logic::error::QuoteError;
use crate::logic::pools::{PoolKey, PoolWrapper};
use crate::utils::{Token, TokenId};
use ahash::RandomState;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

pub type FastHasher = RandomState;
/// FastHashMap using ahash
pub type FastHashMap<K, V> = HashMap<K, V, FastHasher>;

/// Read-only token/pool graph for a single quote request.
///
/// Tokens are nodes and every pool is its own edge, so parallel pools between the same pair are
/// parallel edges. Edge indices follow snapshot order, which is what makes neighbor iteration,
/// and therefore path enumeration, reproducible.
#[derive(Debug, Clone, Default)]
pub struct PoolGraph {
    graph: UnGraph<TokenNode, PoolEdge, usize>,
    // token id -> token (decimals and symbol for the price impact math)
    tokens: FastHashMap<TokenId, Arc<Token>>,
    // token id -> node index
    token_index: FastHashMap<TokenId, NodeIndex<usize>>,
    // pool key -> edge index
    pool_index: FastHashMap<PoolKey, EdgeIndex<usize>>,
}

impl PoolGraph {
    /// Build from a pool snapshot. Tokens not described elsewhere get default metadata.
    pub fn build<P, I>(pools: I) -> Result<Self, QuoteError>
    where
        P: Into<PoolWrapper>,
        I: IntoIterator<Item = P>,
    {
        Self::build_with_tokens(Vec::<Token>::new(), pools)
    }

    /// Build from token metadata plus a pool snapshot. Fails with `DuplicatePoolKey` if two pools
    /// share `(token0, token1, fee tier)` regardless of token order.
    pub fn build_with_tokens<T, P, I>(tokens: T, pools: I) -> Result<Self, QuoteError>
    where
        T: IntoIterator<Item = Token>,
        P: Into<PoolWrapper>,
        I: IntoIterator<Item = P>,
    {
        let mut pool_graph = PoolGraph::default();
        for token in tokens {
            pool_graph.add_or_get_token_idx_by_token(Arc::new(token));
        }
        for pool in pools {
            pool_graph.add_pool(pool.into())?;
        }

        debug!(tokens = pool_graph.token_count(), pools = pool_graph.pool_count(), "Pool graph built");
        Ok(pool_graph)
    }

    fn add_or_get_token_idx_by_token(&mut self, arc_token: Arc<Token>) -> NodeIndex<usize> {
        *self.token_index.entry(arc_token.get_id().clone()).or_insert_with(|| {
            let node = TokenNode::new(arc_token.clone());
            let idx = self.graph.add_node(node);
            self.tokens.insert(arc_token.get_id().clone(), arc_token);
            idx
        })
    }

    fn add_or_get_token_idx_by_id(&mut self, id: &TokenId) -> NodeIndex<usize> {
        if let Some(&idx) = self.token_index.get(id) {
            return idx;
        }
        self.add_or_get_token_idx_by_token(Arc::new(Token::new(id.clone())))
    }

    fn add_pool(&mut self, pool: PoolWrapper) -> Result<(), QuoteError> {
        let pool_key = pool.key();
        if self.pool_index.contains_key(&pool_key) {
            return Err(QuoteError::DuplicatePoolKey(pool_key.to_string()));
        }

        let node0 = self.add_or_get_token_idx_by_id(pool.get_token0());
        let node1 = self.add_or_get_token_idx_by_id(pool.get_token1());
        let edge_index = self.graph.add_edge(node0, node1, PoolEdge::new(pool));
        self.pool_index.insert(pool_key, edge_index);

        Ok(())
    }

    /// Tradeable pools touching `token`, paired with the token on the other side, in snapshot
    /// order. Unknown tokens have no neighbors.
    pub fn neighbors(&self, token: &TokenId) -> Vec<(PoolWrapper, Arc<Token>)> {
        let Some(node) = self.token_index.get(token) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self.graph.edges(*node).filter(|edge| edge.weight().is_active).collect();
        edges.sort_by_key(|edge| edge.id());

        edges
            .into_iter()
            .filter_map(|edge| {
                let pool = &edge.weight().inner;
                let other_token = self.tokens.get(pool.other_token(token)?)?;
                Some((pool.clone(), other_token.clone()))
            })
            .collect()
    }

    pub fn get_token(&self, token: &TokenId) -> Option<&Arc<Token>> {
        self.tokens.get(token)
    }

    pub fn contains_token(&self, token: &TokenId) -> bool {
        self.token_index.contains_key(token)
    }

    pub fn pool(&self, pool_key: &PoolKey) -> Option<&PoolWrapper> {
        let edge_index = self.pool_index.get(pool_key)?;
        self.graph.edge_weight(*edge_index).map(|edge| &edge.inner)
    }

    /// All pools, including inactive ones, in snapshot order.
    pub fn pools(&self) -> impl Iterator<Item = &PoolWrapper> {
        self.graph.edge_weights().map(|edge| &edge.inner)
    }

    pub fn token_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn pool_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenNode {
    pub token: Arc<Token>,
}

impl Display for TokenNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.get_id())
    }
}

impl TokenNode {
    pub fn new(token: Arc<Token>) -> Self {
        Self { token }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolEdge {
    pub is_active: bool,
    pub inner: PoolWrapper,
}

impl Display for PoolEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl PoolEdge {
    pub fn new(pool_wrapper: PoolWrapper) -> Self {
        Self { is_active: pool_wrapper.is_tradeable(), inner: pool_wrapper }
    }
}
