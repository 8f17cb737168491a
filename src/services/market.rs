// src/services/market.rs
use crate::models::{MarketProfile, MarketTier};

const HIGH_DEMAND_TOKENS: [&str; 5] = ["austin", "nashville", "denver", "941", "787"];
const MEDIUM_DEMAND_TOKENS: [&str; 5] = ["tulsa", "fresno", "charlotte", "606", "750"];

const HIGH: MarketProfile = MarketProfile {
    tier: MarketTier::High,
    rent_per_sqft: 2.5,
    price_per_sqft: 350.0,
    demand: "High",
    risk: "Low",
};

const MEDIUM: MarketProfile = MarketProfile {
    tier: MarketTier::Medium,
    rent_per_sqft: 1.8,
    price_per_sqft: 250.0,
    demand: "Medium",
    risk: "Medium",
};

const LOW: MarketProfile = MarketProfile {
    tier: MarketTier::Low,
    rent_per_sqft: 1.2,
    price_per_sqft: 150.0,
    demand: "Low",
    risk: "High",
};

/// Map a free-text location (city name or zip) onto a market tier.
///
/// Matching is a case-insensitive substring test against each tier's
/// tokens, High first. Anything unmatched, including the empty string,
/// lands in the Low tier.
pub fn classify(location: &str) -> MarketProfile {
    let location = location.to_lowercase();
    let matches = |tokens: &[&str]| tokens.iter().any(|t| location.contains(t));

    if matches(&HIGH_DEMAND_TOKENS) {
        HIGH
    } else if matches(&MEDIUM_DEMAND_TOKENS) {
        MEDIUM
    } else {
        LOW
    }
}
