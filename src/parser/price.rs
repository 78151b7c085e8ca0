use std::sync::LazyLock;

use regex::Regex;

// Symbol, optional space, magnitude. No sign is parsed, so prices are never negative.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([£€$])\s*([0-9]+(?:\.[0-9]+)?)").unwrap());

/// Parse the first currency-prefixed amount out of `raw`.
///
/// Only the magnitude is kept: `£12.50`, `€12.50` and `$12.50` all map to `12.5`.
pub fn parse_price(raw: Option<&str>) -> Option<f64> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let caps = PRICE_RE.captures(raw)?;
    caps.get(2)?.as_str().parse().ok()
}
