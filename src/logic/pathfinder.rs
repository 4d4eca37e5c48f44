use super::error::QuoteError;
use super::graph::{PoolGraph, SwapPath};
use crate::utils::TokenId;
use crate::utils::constants::DEFAULT_MAX_PATHS;
use tracing::{trace, warn};

/// Lazy, depth-bounded enumeration of simple paths between two tokens.
///
/// The search is a depth-first walk with an explicit stack. Neighbors are expanded in the order
/// [`PoolGraph::neighbors`] returns them (snapshot order), so the same graph and inputs always
/// yield the same paths in the same order. A branch stops when it reaches `token_out` (the path
/// is emitted) or when it has used `max_hops` hops. Tokens never repeat within a path.
pub struct PathEnumerator<'a> {
    graph: &'a PoolGraph,
    token_out: TokenId,
    max_hops: u8,
    max_paths: usize,
    stack: Vec<SwapPath>,
    emitted: usize,
    truncated: bool,
}

impl<'a> PathEnumerator<'a> {
    pub fn new(graph: &'a PoolGraph, token_in: &TokenId, token_out: &TokenId, max_hops: u8) -> Result<Self, QuoteError> {
        if token_in == token_out {
            return Err(QuoteError::invalid_request(format!("token_in and token_out are both {token_in}")));
        }
        if max_hops < 1 {
            return Err(QuoteError::invalid_request("max_hops must be at least 1"));
        }

        let mut stack = Vec::new();
        if let Some(first_token) = graph.get_token(token_in) {
            for (pool, to_token) in graph.neighbors(token_in).into_iter().rev() {
                stack.push(SwapPath::new_first(first_token.clone(), to_token, pool));
            }
        }

        Ok(Self { graph, token_out: token_out.clone(), max_hops, max_paths: DEFAULT_MAX_PATHS, stack, emitted: 0, truncated: false })
    }

    /// Stop after `max_paths` paths. This only guards against pathological snapshots; with the
    /// default limit it never triggers for realistic hop bounds.
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self
    }

    /// True once the enumeration stopped at `max_paths` while at least one more path existed.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn next_path(&mut self) -> Option<SwapPath> {
        while let Some(current_path) = self.stack.pop() {
            let Some(last_token) = current_path.token_out() else {
                continue;
            };

            if *last_token.get_id() == self.token_out {
                return Some(current_path);
            }

            // If we've used all allowed hops, skip expansion
            if current_path.len() >= self.max_hops as usize {
                continue;
            }

            // Reverse so the first neighbor ends on top of the stack and is explored first
            for (pool, to_token) in self.graph.neighbors(last_token.get_id()).into_iter().rev() {
                if current_path.contains_token(to_token.get_id()) {
                    continue;
                }
                let mut new_path = current_path.clone();
                if new_path.push_swap_hop(to_token, pool).is_ok() {
                    self.stack.push(new_path);
                }
            }
        }

        None
    }
}

impl Iterator for PathEnumerator<'_> {
    type Item = SwapPath;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= self.max_paths {
            if !self.truncated && self.next_path().is_some() {
                warn!(max_paths = self.max_paths, token_out = %self.token_out, "Path limit reached, stopping enumeration");
                self.truncated = true;
            }
            self.stack.clear();
            return None;
        }

        let path = self.next_path()?;
        self.emitted += 1;
        trace!(path = %path, "Candidate path");
        Some(path)
    }
}

/// Collect every simple path from `token_in` to `token_out` with at most `max_hops` hops.
pub fn find_all_paths(graph: &PoolGraph, token_in: &TokenId, token_out: &TokenId, max_hops: u8) -> Result<Vec<SwapPath>, QuoteError> {
    Ok(PathEnumerator::new(graph, token_in, token_out, max_hops)?.collect())
}
