use super::swap_path_hash::{SwapPathHash, SwapPathHasher};
use crate::logic::error::QuoteError;
use crate::logic::pools::{PoolKey, PoolWrapper};
use crate::utils::{Token, TokenId};
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A single trade through one pool, in trade direction.
#[derive(Clone, Copy, Debug)]
pub struct Hop<'a> {
    pub pool: &'a PoolWrapper,
    pub token_in: &'a Arc<Token>,
    pub token_out: &'a Arc<Token>,
}

#[derive(Clone, Debug, Default, Eq)]
pub struct SwapPath {
    // The tokens of the path e.g. token0 -> token1 -> token2
    pub tokens: Vec<Arc<Token>>,
    // The pools of the path e.g. pool0 -> pool1
    pub pools: Vec<PoolWrapper>,
}

impl Display for SwapPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SwapPath(pools={:?}, tokens={:?})",
            self.pools.iter().map(|p| p.to_string()).collect::<Vec<String>>(),
            self.tokens.iter().map(|t| t.get_id().to_string()).collect::<Vec<String>>()
        )
    }
}

impl SwapPath {
    /// Create a new swap path for a list of tokens and pools
    pub fn new<T: Into<Arc<Token>>, P: Into<PoolWrapper>>(tokens: Vec<T>, pools: Vec<P>) -> Self {
        let tokens: Vec<Arc<Token>> = tokens.into_iter().map(|i| i.into()).collect();
        let pools: Vec<PoolWrapper> = pools.into_iter().map(|p| p.into()).collect();

        SwapPath { tokens, pools }
    }

    /// Create a new swap path with only one hop
    pub fn new_first(token_from: Arc<Token>, token_to: Arc<Token>, pool: PoolWrapper) -> Self {
        SwapPath { tokens: vec![token_from, token_to], pools: vec![pool] }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.pools.is_empty()
    }

    pub fn tokens_count(&self) -> usize {
        self.tokens.len()
    }

    /// The hop count of the swap path
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn token_in(&self) -> Option<&Arc<Token>> {
        self.tokens.first()
    }

    pub fn token_out(&self) -> Option<&Arc<Token>> {
        self.tokens.last()
    }

    /// Invert the swap path
    pub fn invert(&self) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.reverse();
        let mut pools = self.pools.clone();
        pools.reverse();

        SwapPath { tokens, pools }
    }

    /// Push a new pool hop to the swap path. The pool must connect the current last token with
    /// `token_to`, and `token_to` must not already be on the path.
    pub fn push_swap_hop(&mut self, token_to: Arc<Token>, pool: PoolWrapper) -> Result<&mut Self, QuoteError> {
        let Some(last_token) = self.tokens.last() else {
            return Err(QuoteError::invalid_request("swap path is empty"));
        };
        if pool.other_token(last_token.get_id()) != Some(token_to.get_id()) {
            return Err(QuoteError::invalid_request(format!(
                "pool {pool} does not connect {} to {}",
                last_token.get_id(),
                token_to.get_id()
            )));
        }
        if self.contains_token(token_to.get_id()) {
            return Err(QuoteError::invalid_request(format!("token {} is already on the path", token_to.get_id())));
        }

        self.tokens.push(token_to);
        self.pools.push(pool);

        Ok(self)
    }

    pub fn contains_token(&self, token: &TokenId) -> bool {
        self.tokens.iter().any(|t| t.get_id() == token)
    }

    /// Check if the swap path contains a pool
    pub fn contains_pool(&self, pool: &PoolWrapper) -> bool {
        self.pools.contains(pool)
    }

    pub fn hops(&self) -> impl Iterator<Item = Hop<'_>> {
        self.pools.iter().enumerate().map(|(i, pool)| Hop { pool, token_in: &self.tokens[i], token_out: &self.tokens[i + 1] })
    }

    pub fn pool_keys(&self) -> Vec<PoolKey> {
        self.pools.iter().map(|pool| pool.key()).collect()
    }

    pub fn swap_path_hash(&self) -> SwapPathHash {
        generate_swap_path_hash(&self.tokens, &self.pools)
    }
}

impl Hash for SwapPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens.hash(state);
        self.pools.hash(state);
    }
}

impl PartialEq for SwapPath {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens && self.pools == other.pools
    }
}

/// Hash the token ids and pool keys of the path, in trade order.
pub fn generate_swap_path_hash(tokens: &[Arc<Token>], pools: &[PoolWrapper]) -> SwapPathHash {
    let hasher = tokens.iter().fold(SwapPathHasher::new(), |hasher, token| hasher.item(token.get_id().as_str().as_bytes()));
    pools.iter().fold(hasher, |hasher, pool| hasher.item(pool.key().to_string().as_bytes())).finish()
}
