use super::amount_calculator::{amount_in_along, amount_out_along};
use super::config::RouterConfigSection;
use super::error::QuoteError;
use super::graph::{PoolGraph, SwapPath};
use super::pathfinder::PathEnumerator;
use super::pools::PoolWrapper;
use super::price_impact::{evaluate, path_spot_price};
use super::types::{ExactOutputRequest, PriceMap, Quote, QuoteRequest};
use crate::utils::TokenId;
use alloy_primitives::U256;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info, trace};

/// Stateless entry point: validates a request, enumerates candidate paths, prices each of them
/// and returns the best one.
///
/// Selection is over results collected in enumeration order, so the parallel and sequential
/// pricing modes always agree. A candidate that fails with a non-fatal error (no liquidity, zero
/// output) is dropped. An arithmetic error aborts the request instead of being mistaken for
/// "no route".
#[derive(Clone, Debug, Default)]
pub struct QuoteService {
    config: RouterConfigSection,
}

impl QuoteService {
    pub fn new(config: RouterConfigSection) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfigSection {
        &self.config
    }

    /// Best route selling exactly `request.amount_in`: the strictly greatest output wins, ties
    /// go to fewer hops and then to the first enumerated path.
    pub fn quote(&self, graph: &PoolGraph, request: &QuoteRequest, prices: &PriceMap) -> Result<Quote, QuoteError> {
        let max_hops = self.max_hops(request.max_hops);
        validate(&request.token_in, &request.token_out, request.amount_in, max_hops)?;

        let paths = self.candidate_paths(graph, &request.token_in, &request.token_out, max_hops)?;
        let amounts = self.price_paths(&paths, |path| amount_out_along(path, request.amount_in));
        let (path, amount_out) =
            select_best(paths, amounts, |candidate, best| candidate.cmp(&best)).ok_or_else(|| no_route(&request.token_in, &request.token_out))??;

        let price_impact = price_impact(&path, request.amount_in, amount_out, prices);
        let quote = Quote::new(path, request.amount_in, amount_out, price_impact);

        info!(route = %quote.path, amount_in = %quote.amount_in, amount_out = %quote.amount_out, price_impact = ?quote.price_impact, "Route selected");
        Ok(quote)
    }

    /// Cheapest route buying exactly `request.amount_out`: the strictly smallest required input
    /// wins, ties go to fewer hops and then to the first enumerated path. The returned amount out
    /// is what the chosen input actually buys, which is never below the requested amount.
    pub fn quote_exact_output(&self, graph: &PoolGraph, request: &ExactOutputRequest, prices: &PriceMap) -> Result<Quote, QuoteError> {
        let max_hops = self.max_hops(request.max_hops);
        validate(&request.token_in, &request.token_out, request.amount_out, max_hops)?;

        let paths = self.candidate_paths(graph, &request.token_in, &request.token_out, max_hops)?;
        let amounts = self.price_paths(&paths, |path| amount_in_along(path, request.amount_out));
        let (path, amount_in) =
            select_best(paths, amounts, |candidate, best| best.cmp(&candidate)).ok_or_else(|| no_route(&request.token_in, &request.token_out))??;

        let amount_out = amount_out_along(&path, amount_in)?;
        let price_impact = price_impact(&path, amount_in, amount_out, prices);
        let quote = Quote::new(path, amount_in, amount_out, price_impact);

        info!(route = %quote.path, amount_in = %quote.amount_in, amount_out = %quote.amount_out, price_impact = ?quote.price_impact, "Exact output route selected");
        Ok(quote)
    }

    /// Build a fresh graph from `pools` and quote against it.
    pub fn quote_snapshot<P, I>(&self, pools: I, request: &QuoteRequest, prices: &PriceMap) -> Result<Quote, QuoteError>
    where
        P: Into<PoolWrapper>,
        I: IntoIterator<Item = P>,
    {
        validate(&request.token_in, &request.token_out, request.amount_in, self.max_hops(request.max_hops))?;
        let graph = PoolGraph::build(pools)?;
        self.quote(&graph, request, prices)
    }

    /// The request's hop bound, or the configured one when the request has none.
    fn max_hops(&self, requested: Option<u8>) -> u8 {
        requested.unwrap_or(self.config.max_hops)
    }

    /// Every candidate path, or `PathLimitExceeded` when `max_paths` cut the enumeration short.
    fn candidate_paths(&self, graph: &PoolGraph, token_in: &TokenId, token_out: &TokenId, max_hops: u8) -> Result<Vec<SwapPath>, QuoteError> {
        let mut enumerator = PathEnumerator::new(graph, token_in, token_out, max_hops)?.with_max_paths(self.config.max_paths);
        let paths: Vec<SwapPath> = enumerator.by_ref().collect();
        if enumerator.is_truncated() {
            return Err(QuoteError::PathLimitExceeded { max_paths: self.config.max_paths });
        }
        debug!(%token_in, %token_out, max_hops, candidates = paths.len(), "Candidate paths enumerated");
        Ok(paths)
    }

    /// Price every path, keeping enumeration order in the result.
    fn price_paths<F>(&self, paths: &[SwapPath], price: F) -> Vec<Result<U256, QuoteError>>
    where
        F: Fn(&SwapPath) -> Result<U256, QuoteError> + Sync + Send,
    {
        if self.config.enable_parallel_calculation {
            paths.par_iter().map(&price).collect()
        } else {
            paths.iter().map(&price).collect()
        }
    }
}

fn validate(token_in: &TokenId, token_out: &TokenId, amount: U256, max_hops: u8) -> Result<(), QuoteError> {
    if token_in == token_out {
        return Err(QuoteError::invalid_request(format!("token_in and token_out are both {token_in}")));
    }
    if amount.is_zero() {
        return Err(QuoteError::invalid_request("amount must be positive"));
    }
    if max_hops < 1 {
        return Err(QuoteError::invalid_request("max_hops must be at least 1"));
    }
    Ok(())
}

fn no_route(token_in: &TokenId, token_out: &TokenId) -> QuoteError {
    QuoteError::NoRouteFound { token_in: token_in.to_string(), token_out: token_out.to_string() }
}

/// Pick the best priced path. `prefer(candidate, best)` returns `Greater` when the candidate
/// amount is strictly better. Returns `None` when no path survives and `Some(Err)` on the first
/// fatal error.
fn select_best<P>(paths: Vec<SwapPath>, amounts: Vec<Result<U256, QuoteError>>, prefer: P) -> Option<Result<(SwapPath, U256), QuoteError>>
where
    P: Fn(U256, U256) -> Ordering,
{
    let mut best: Option<(SwapPath, U256)> = None;

    for (path, amount) in paths.into_iter().zip(amounts) {
        let amount = match amount {
            Ok(amount) => amount,
            Err(err) if err.is_fatal() => return Some(Err(err)),
            Err(err) => {
                trace!(path = %path, %err, "Candidate dropped");
                continue;
            }
        };

        let is_better = match &best {
            None => true,
            Some((best_path, best_amount)) => match prefer(amount, *best_amount) {
                Ordering::Greater => true,
                Ordering::Equal => path.len() < best_path.len(),
                Ordering::Less => false,
            },
        };
        if is_better {
            best = Some((path, amount));
        }
    }

    best.map(Ok)
}

/// Price impact against the caller's prices, falling back to the path's own mid price when a
/// token is missing from `prices` or the input cannot be valued.
fn price_impact(path: &SwapPath, amount_in: U256, amount_out: U256, prices: &PriceMap) -> Option<f64> {
    let numeraire = path.token_in().zip(path.token_out()).and_then(|(token_in, token_out)| {
        let spot_price_in = prices.get(token_in.get_id())?;
        let spot_price_out = prices.get(token_out.get_id())?;
        evaluate(path, amount_in, amount_out, *spot_price_in, *spot_price_out)
    });

    numeraire.or_else(|| evaluate(path, amount_in, amount_out, path_spot_price(path)?, 1.0))
}
