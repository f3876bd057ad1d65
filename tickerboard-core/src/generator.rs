//! Synthetic record generation.
//!
//! Records are drawn from a catalog of securities. Every metric is random
//! within a plausible band; nothing here talks to a market-data source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Sector, Security, StockRecord, PRICE_FLOOR};

/// Built-in catalog, ordered so that any prefix spans several sectors.
pub fn default_catalog() -> Vec<Security> {
    use Sector::*;
    [
        ("AAPL", "Apple Inc.", Technology),
        ("JNJ", "Johnson & Johnson", Healthcare),
        ("JPM", "JPMorgan Chase & Co.", Finance),
        ("XOM", "Exxon Mobil Corporation", Energy),
        ("AMZN", "Amazon.com Inc.", Consumer),
        ("MSFT", "Microsoft Corporation", Technology),
        ("PFE", "Pfizer Inc.", Healthcare),
        ("BAC", "Bank of America Corporation", Finance),
        ("CVX", "Chevron Corporation", Energy),
        ("WMT", "Walmart Inc.", Consumer),
        ("NVDA", "NVIDIA Corporation", Technology),
        ("UNH", "UnitedHealth Group Inc.", Healthcare),
        ("GS", "The Goldman Sachs Group, Inc.", Finance),
        ("COP", "ConocoPhillips", Energy),
        ("TSLA", "Tesla, Inc.", Consumer),
        ("GOOGL", "Alphabet Inc.", Technology),
        ("MRK", "Merck & Co., Inc.", Healthcare),
        ("V", "Visa Inc.", Finance),
        ("SLB", "Schlumberger Limited", Energy),
        ("NKE", "NIKE, Inc.", Consumer),
        ("META", "Meta Platforms, Inc.", Technology),
        ("ABBV", "AbbVie Inc.", Healthcare),
        ("MA", "Mastercard Incorporated", Finance),
        ("EOG", "EOG Resources, Inc.", Energy),
        ("MCD", "McDonald's Corporation", Consumer),
        ("CSCO", "Cisco Systems, Inc.", Technology),
        ("SNAP", "Snap Inc.", Technology),
    ]
    .into_iter()
    .map(|(symbol, name, sector)| Security::new(symbol, name, sector))
    .collect()
}

/// Seeded RNG when a seed is given, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate one record for `security` with a `chart_len`-sample history.
pub fn generate_record<R: Rng>(
    security: &Security,
    chart_len: usize,
    rng: &mut R,
) -> StockRecord {
    let base_price: f64 = rng.gen_range(20.0..320.0);
    let change: f64 = (rng.gen::<f64>() - 0.5) * 10.0;
    let percent_change = change / base_price * 100.0;

    let chart_data = (0..chart_len)
        .map(|i| {
            let wave = (i as f64 * 0.3).sin() * 10.0;
            let noise = (rng.gen::<f64>() - 0.5) * 15.0;
            (base_price + wave + noise).max(PRICE_FLOOR)
        })
        .collect();

    StockRecord {
        symbol: security.symbol.clone(),
        name: security.name.clone(),
        price: base_price,
        change,
        percent_change,
        volume: rng.gen_range(1_000_000..101_000_000),
        avg_volume: rng.gen_range(5_000_000..55_000_000),
        market_cap: rng.gen_range(100..2_100) as f64,
        pe_ratio: rng.gen_range(5.0..55.0),
        one_day_change: percent_change,
        sector: security.sector,
        chart_data,
    }
}

/// Generate records for the first `count` catalog entries, in catalog order.
pub fn generate_board<R: Rng>(
    catalog: &[Security],
    count: usize,
    chart_len: usize,
    rng: &mut R,
) -> Vec<StockRecord> {
    catalog
        .iter()
        .take(count)
        .map(|security| generate_record(security, chart_len, rng))
        .collect()
}
