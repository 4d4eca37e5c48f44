use alloy_primitives::U256;
use eyre::Result;
use swap_router::utils::HTR;
use swap_router::{ConfigLoader, ExactOutputRequest, Pool, PoolGraph, PriceMap, QuoteRequest, QuoteResponse, QuoteService, RouterConfigSection, Token};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SNAPSHOT: &str = r#"[
    {"token0": "00", "token1": "0x", "reserve0": "1000000", "reserve1": "500000", "fee": {"numerator": 5}},
    {"token0": "00", "token1": "0a", "reserve0": "50000000", "reserve1": "2000000", "fee": {"numerator": 3}},
    {"token0": "0a", "token1": "0x", "reserve0": "4000000", "reserve1": "50000000", "fee": {"numerator": 3}},
    {"token0": "00", "token1": "0x", "reserve0": "2000000", "reserve1": "1000000", "fee": {"numerator": 30}}
]"#;

/// Quote a small snapshot in both directions and print the responses as JSON.
///
/// Usage: `cargo run --example quote_snapshot [config.toml]`. The config file needs a `[router]`
/// table; without one the defaults apply.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).with_target(false).init();

    let config = match std::env::args().nth(1) {
        Some(file_name) => RouterConfigSection::load_section_from_file(file_name).await?,
        None => RouterConfigSection::default(),
    };
    info!(?config, "Router config");

    let tokens = vec![
        Token::new_with_data(HTR, Some("HTR".to_string()), Some("Hathor".to_string()), Some(2)),
        Token::new_with_data("0a", Some("USD".to_string()), None, Some(2)),
        Token::new_with_data("0x", Some("X".to_string()), None, Some(2)),
    ];
    let pools: Vec<Pool> = serde_json::from_str(SNAPSHOT)?;
    let graph = PoolGraph::build_with_tokens(tokens, pools)?;

    let mut prices = PriceMap::default();
    prices.insert(HTR.into(), 0.04);
    prices.insert("0a".into(), 1.0);
    prices.insert("0x".into(), 0.08);

    let service = QuoteService::new(config);

    let exact_in = service.quote(&graph, &QuoteRequest::new(HTR, "0x", U256::from(10_000)), &prices)?;
    println!("{}", serde_json::to_string_pretty(&QuoteResponse::from(&exact_in))?);
    println!("minimum out at 0.5% slippage: {}", exact_in.minimum_amount_out(50)?);

    let exact_out = service.quote_exact_output(&graph, &ExactOutputRequest::new(HTR, "0x", U256::from(20_000)), &prices)?;
    println!("{}", serde_json::to_string_pretty(&QuoteResponse::from(&exact_out))?);
    println!("maximum in at 0.5% slippage: {}", exact_out.maximum_amount_in(50)?);

    Ok(())
}
