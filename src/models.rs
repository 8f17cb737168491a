// src/models.rs
use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpensePeriod {
    Monthly,
    Annual,
}

/// Operating expenses with their unit made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expenses {
    pub amount: f64,
    pub period: ExpensePeriod,
}

impl Expenses {
    pub fn monthly(amount: f64) -> Self {
        Expenses { amount, period: ExpensePeriod::Monthly }
    }

    pub fn annual(amount: f64) -> Self {
        Expenses { amount, period: ExpensePeriod::Annual }
    }

    pub fn annualized(&self) -> f64 {
        match self.period {
            ExpensePeriod::Monthly => self.amount * 12.0,
            ExpensePeriod::Annual => self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Downpayment {
    Amount(f64),
    Percent(f64),
}

/// Inputs for the NOI / market-estimate strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiInput {
    pub purchase_price: f64,
    pub monthly_rent: f64,
    pub expenses: Expenses,
    pub downpayment: Downpayment,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub size_sqft: f64,
}

/// Inputs for the multi-year holding strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonInput {
    pub purchase_price: f64,
    pub monthly_rent: f64,
    pub expenses: Expenses,
    pub downpayment: Downpayment,
    pub duration_years: u32,
    // 1 (safe) to 10 (risky), supplied by the user
    #[serde(default)]
    pub risk_rating: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketTier {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketProfile {
    pub tier: MarketTier,
    pub rent_per_sqft: f64,
    pub price_per_sqft: f64,
    pub demand: &'static str,
    pub risk: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Hold,
    Avoid,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Avoid => "Avoid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Good,
    Moderate,
    #[serde(rename = "High Risk / Low ROI")]
    HighRiskLowRoi,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Good => "Good",
            Verdict::Moderate => "Moderate",
            Verdict::HighRiskLowRoi => "High Risk / Low ROI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoiAnalysis {
    pub roi_pct: f64,
    pub cap_rate_pct: f64,
    pub cash_on_cash_pct: f64,
    pub net_operating_income: f64,
    pub cash_flow: f64,
    pub downpayment: f64,
    pub recommendation: Recommendation,
    pub market_tier: MarketTier,
    pub estimated_monthly_rent: f64,
    pub estimated_market_price: f64,
    pub demand: &'static str,
    pub risk: &'static str,
}

impl NoiAnalysis {
    /// Display rows in report order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ROI %", format!("{:.2}", self.roi_pct)),
            ("Cap Rate %", format!("{:.2}", self.cap_rate_pct)),
            ("Cash-on-Cash Return %", format!("{:.2}", self.cash_on_cash_pct)),
            ("Recommendation", self.recommendation.as_str().to_string()),
            ("Market Rent Estimate ($/mo)", format!("{:.2}", self.estimated_monthly_rent)),
            ("Market Price Estimate", format!("{:.2}", self.estimated_market_price)),
            ("Demand Score", self.demand.to_string()),
            ("Risk Score", self.risk.to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonAnalysis {
    pub downpayment: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_profit: f64,
    pub roi_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

impl HorizonAnalysis {
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Downpayment", format!("{:.2}", self.downpayment)),
            ("Total Income", format!("{:.2}", self.total_income)),
            ("Total Expense", format!("{:.2}", self.total_expense)),
            ("Net Profit", format!("{:.2}", self.net_profit)),
            ("ROI %", format!("{:.2}", self.roi_pct)),
        ];
        if let Some(verdict) = self.verdict {
            rows.push(("Investment Verdict", verdict.as_str().to_string()));
        }
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AnalysisRecord {
    Noi(NoiAnalysis),
    Horizon(HorizonAnalysis),
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub recorded_at: DateTime<Utc>,
    pub analysis: AnalysisRecord,
}

/// Where a third-party value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub converted: f64,
    pub source: DataSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub source: DataSource,
}
