//! End-to-end quoting over a small multi-token snapshot
//!
//! These tests go through the public service surface only: a JSON pool snapshot is parsed,
//! turned into a graph and quoted in both directions.

mod scenario_tests {
    use super::super::*;
    use crate::utils::constants::HTR;
    use alloy_primitives::U256;

    const SNAPSHOT: &str = r#"[
        {"token0": "00", "token1": "0x", "reserve0": "1000000", "reserve1": "500000", "fee": {"numerator": 5}},
        {"token0": "00", "token1": "0a", "reserve0": "50000000", "reserve1": "2000000", "fee": {"numerator": 3}},
        {"token0": "0a", "token1": "0x", "reserve0": "4000000", "reserve1": "50000000", "fee": {"numerator": 3}},
        {"token0": "0a", "token1": "0b", "reserve0": "3000000", "reserve1": "3000000", "fee": {"numerator": 1}},
        {"token0": "0b", "token1": "0x", "reserve0": "1000000", "reserve1": "12000000", "fee": {"numerator": 3}},
        {"token0": "00", "token1": "0x", "reserve0": "2000000", "reserve1": "1000000", "fee": {"numerator": 30}},
        {"token0": "0c", "token1": "0x", "reserve0": "0", "reserve1": "1000", "fee": {"numerator": 3}},
        {"token0": "0b", "token1": "0d", "reserve0": "1000", "reserve1": "1000", "fee": {"numerator": 3}, "active": false}
    ]"#;

    fn snapshot() -> eyre::Result<Vec<Pool>> {
        Ok(serde_json::from_str(SNAPSHOT)?)
    }

    fn prices() -> PriceMap {
        let mut prices = PriceMap::default();
        prices.insert(HTR.into(), 0.04);
        prices.insert("0a".into(), 1.0);
        prices.insert("0x".into(), 0.08);
        prices
    }

    fn requests() -> Vec<QuoteRequest> {
        let mut requests = vec![];
        for (token_in, token_out) in [(HTR, "0x"), ("0x", HTR), (HTR, "0b"), ("0b", "0a"), ("0a", HTR)] {
            for amount in [1_000u64, 10_000, 250_000] {
                for max_hops in [1, 2, 3, 4] {
                    requests.push(QuoteRequest::new(token_in, token_out, U256::from(amount)).with_max_hops(max_hops));
                }
            }
        }
        requests
    }

    #[test]
    fn test_parallel_and_sequential_agree() -> eyre::Result<()> {
        let graph = PoolGraph::build(snapshot()?)?;
        let parallel = QuoteService::new(RouterConfigSection::default().with_parallel_calculation(true));
        let sequential = QuoteService::new(RouterConfigSection::default().with_parallel_calculation(false));

        for request in requests() {
            assert_eq!(parallel.quote(&graph, &request, &prices()), sequential.quote(&graph, &request, &prices()), "{request:?}");
        }
        Ok(())
    }

    #[test]
    fn test_quotes_are_reproducible() -> eyre::Result<()> {
        let service = QuoteService::default();
        let request = QuoteRequest::new(HTR, "0x", U256::from(10_000));

        let first = serde_json::to_string(&QuoteResponse::from(&service.quote_snapshot(snapshot()?, &request, &prices())?))?;
        for _ in 0..5 {
            let next = serde_json::to_string(&QuoteResponse::from(&service.quote_snapshot(snapshot()?, &request, &prices())?))?;
            assert_eq!(first, next);
        }
        Ok(())
    }

    #[test]
    fn test_best_route_is_at_least_every_candidate() -> eyre::Result<()> {
        let graph = PoolGraph::build(snapshot()?)?;
        let service = QuoteService::default();

        for request in requests() {
            let Ok(quote) = service.quote(&graph, &request, &prices()) else {
                continue;
            };
            let max_hops = request.max_hops.unwrap_or(service.config().max_hops);
            assert!(quote.path.len() <= max_hops as usize);
            for path in find_all_paths(&graph, &request.token_in, &request.token_out, max_hops)? {
                if let Ok(amount_out) = amount_out_along(&path, request.amount_in) {
                    assert!(amount_out <= quote.amount_out, "{path} beats {}", quote.path);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_fixture_pool_inside_larger_snapshot() -> eyre::Result<()> {
        let graph = PoolGraph::build(snapshot()?)?;
        let request = QuoteRequest::new(HTR, "0x", U256::from(10_000)).with_max_hops(1);
        let quote = QuoteService::default().quote(&graph, &request, &prices())?;

        // the 0.5% pool beats the 3% pool with the same mid price
        assert_eq!(quote.amount_out, U256::from(4925));
        assert_eq!(quote.route(), vec!["00/0x/5000"]);
        Ok(())
    }

    #[test]
    fn test_untradeable_pools_never_route() -> eyre::Result<()> {
        let graph = PoolGraph::build(snapshot()?)?;
        let service = QuoteService::default();

        for token_out in ["0c", "0d"] {
            let result = service.quote(&graph, &QuoteRequest::new(HTR, token_out, U256::from(1_000)).with_max_hops(4), &prices());
            assert!(matches!(result, Err(QuoteError::NoRouteFound { .. })), "{token_out}: {result:?}");
        }
        Ok(())
    }

    #[test]
    fn test_large_trade_is_blocked() -> eyre::Result<()> {
        let graph = PoolGraph::build(vec![Pool::new(HTR, "0x", U256::from(1_000_000), U256::from(500_000), Fee::new(5, 1000)?, true)?])?;
        let quote = QuoteService::default().quote(&graph, &QuoteRequest::new(HTR, "0x", U256::from(1_000_000)), &PriceMap::default())?;

        assert!(quote.price_impact.unwrap() >= PRICE_IMPACT_BLOCKED);
        assert!(quote.severity.is_blocked());
        Ok(())
    }

    #[test]
    fn test_exact_output_covers_request() -> eyre::Result<()> {
        let graph = PoolGraph::build(snapshot()?)?;
        let service = QuoteService::default();

        for (token_in, token_out) in [(HTR, "0x"), ("0x", HTR), (HTR, "0b")] {
            let wanted = U256::from(5_000);
            let quote = service.quote_exact_output(&graph, &ExactOutputRequest::new(token_in, token_out, wanted), &prices())?;
            assert!(quote.amount_out >= wanted);

            // one unit less on the same route no longer buys the requested amount
            let short = amount_out_along(&quote.path, quote.amount_in - U256::from(1));
            assert!(short.map(|amount| amount < wanted).unwrap_or(true));

            // selling the required input finds a route at least as good
            let forward = service.quote(&graph, &QuoteRequest::new(token_in, token_out, quote.amount_in), &prices())?;
            assert!(forward.amount_out >= wanted);
        }
        Ok(())
    }

    #[test]
    fn test_slippage_guard_on_quote() -> eyre::Result<()> {
        let graph = PoolGraph::build(snapshot()?)?;
        let quote = QuoteService::default().quote(&graph, &QuoteRequest::new(HTR, "0x", U256::from(10_000)), &prices())?;

        let minimum = quote.minimum_amount_out(100)?;
        assert!(minimum < quote.amount_out);
        assert!(minimum >= quote.amount_out * U256::from(99) / U256::from(100));
        Ok(())
    }

    #[test]
    fn test_overflow_aborts_request() -> eyre::Result<()> {
        let mut pools = snapshot()?;
        pools.push(Pool::new("0a", "0e", U256::MAX, U256::MAX, Fee::new(3, 1000)?, true)?);
        pools.push(Pool::new(HTR, "0e", U256::from(1_000_000), U256::from(1_000_000), Fee::new(3, 1000)?, true)?);

        let result = QuoteService::default().quote_snapshot(pools, &QuoteRequest::new(HTR, "0e", U256::from(1_000)), &prices());
        assert_eq!(result, Err(QuoteError::ArithmeticOverflow));
        Ok(())
    }
}
