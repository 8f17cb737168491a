// src/services/calculations.rs
use log::debug;
use crate::models::{
    Downpayment, Expenses, HorizonAnalysis, HorizonInput, NoiAnalysis, NoiInput, Recommendation,
    Verdict,
};
use crate::services::error::{AnalysisError, AnalysisResult};
use crate::services::market::classify;

const MONTHS_PER_YEAR: f64 = 12.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator` as a percentage, or 0 when the denominator is zero.
fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

fn non_negative(name: &str, value: f64) -> AnalysisResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AnalysisError::invalid(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(value)
}

fn purchase_price(value: f64) -> AnalysisResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AnalysisError::invalid(format!(
            "purchase_price must be positive, got {}",
            value
        )));
    }
    Ok(value)
}

/// Reject results that overflowed; JSON has no representation for them.
fn ensure_finite(values: &[(&str, f64)]) -> AnalysisResult<()> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(AnalysisError::invalid(format!(
            "inputs are too large: {} evaluates to {}",
            name, value
        ))),
        None => Ok(()),
    }
}

fn annual_expenses(expenses: &Expenses) -> AnalysisResult<f64> {
    non_negative("expenses", expenses.amount).map(|_| expenses.annualized())
}

/// Resolve a downpayment to a currency amount against the purchase price.
pub fn resolve_downpayment(downpayment: Downpayment, price: f64) -> AnalysisResult<f64> {
    match downpayment {
        Downpayment::Amount(amount) => non_negative("downpayment", amount),
        Downpayment::Percent(pct) => {
            if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                return Err(AnalysisError::invalid(format!(
                    "downpayment percent must be between 0 and 100, got {}",
                    pct
                )));
            }
            Ok(pct / 100.0 * price)
        }
    }
}

pub fn recommend(cash_on_cash_pct: f64) -> Recommendation {
    if cash_on_cash_pct >= 10.0 {
        Recommendation::Buy
    } else if cash_on_cash_pct >= 5.0 {
        Recommendation::Hold
    } else {
        Recommendation::Avoid
    }
}

/// Classify a holding-period ROI against a user risk rating (1 to 10).
pub fn classify_risk_return(roi_pct: f64, risk_rating: u8) -> AnalysisResult<Verdict> {
    if !(1..=10).contains(&risk_rating) {
        return Err(AnalysisError::invalid(format!(
            "risk_rating must be between 1 and 10, got {}",
            risk_rating
        )));
    }

    let verdict = if roi_pct > 10.0 && risk_rating <= 5 {
        Verdict::Good
    } else if roi_pct > 5.0 && risk_rating <= 7 {
        Verdict::Moderate
    } else {
        Verdict::HighRiskLowRoi
    };
    Ok(verdict)
}

/// Single-year analysis driven by net operating income, with a market
/// estimate for the property's location and size.
pub fn analyze_noi(input: &NoiInput) -> AnalysisResult<NoiAnalysis> {
    let price = purchase_price(input.purchase_price)?;
    let monthly_rent = non_negative("monthly_rent", input.monthly_rent)?;
    let annual_expenses = annual_expenses(&input.expenses)?;
    let size_sqft = non_negative("size_sqft", input.size_sqft)?;
    let downpayment = resolve_downpayment(input.downpayment, price)?;

    let market = classify(&input.location);
    debug!("Location {:?} classified as {:?}", input.location, market.tier);

    let estimated_monthly_rent = market.rent_per_sqft * size_sqft;
    let estimated_market_price = market.price_per_sqft * size_sqft;

    let annual_income = monthly_rent * MONTHS_PER_YEAR;
    let net_operating_income = annual_income - annual_expenses;
    // no debt service is modelled
    let cash_flow = net_operating_income;

    let cap_rate_pct = percent_of(net_operating_income, price);
    let roi_pct = percent_of(cash_flow, price);
    let cash_on_cash_pct = percent_of(cash_flow, downpayment);

    let analysis = NoiAnalysis {
        roi_pct: round2(roi_pct),
        cap_rate_pct: round2(cap_rate_pct),
        cash_on_cash_pct: round2(cash_on_cash_pct),
        net_operating_income: round2(net_operating_income),
        cash_flow: round2(cash_flow),
        downpayment: round2(downpayment),
        recommendation: recommend(cash_on_cash_pct),
        market_tier: market.tier,
        estimated_monthly_rent: round2(estimated_monthly_rent),
        estimated_market_price: round2(estimated_market_price),
        demand: market.demand,
        risk: market.risk,
    };
    ensure_finite(&[
        ("annual_expenses", annual_expenses),
        ("roi_pct", analysis.roi_pct),
        ("cap_rate_pct", analysis.cap_rate_pct),
        ("cash_on_cash_pct", analysis.cash_on_cash_pct),
        ("net_operating_income", analysis.net_operating_income),
        ("downpayment", analysis.downpayment),
        ("estimated_monthly_rent", analysis.estimated_monthly_rent),
        ("estimated_market_price", analysis.estimated_market_price),
    ])?;
    Ok(analysis)
}

/// Whole-holding-period analysis: income and expenses accumulated over
/// `duration_years`, ROI measured against the cash put down.
pub fn analyze_horizon(input: &HorizonInput) -> AnalysisResult<HorizonAnalysis> {
    let price = purchase_price(input.purchase_price)?;
    let monthly_rent = non_negative("monthly_rent", input.monthly_rent)?;
    let annual_expenses = annual_expenses(&input.expenses)?;
    let downpayment = resolve_downpayment(input.downpayment, price)?;
    if input.duration_years == 0 {
        return Err(AnalysisError::invalid("duration_years must be at least 1"));
    }
    let years = f64::from(input.duration_years);

    let total_income = monthly_rent * MONTHS_PER_YEAR * years;
    let total_expense = annual_expenses * years;
    let net_profit = total_income - total_expense;
    let roi_pct = round2(percent_of(net_profit, downpayment));
    ensure_finite(&[
        ("total_income", round2(total_income)),
        ("total_expense", round2(total_expense)),
        ("net_profit", round2(net_profit)),
        ("downpayment", round2(downpayment)),
        ("roi_pct", roi_pct),
    ])?;

    let verdict = input
        .risk_rating
        .map(|risk| classify_risk_return(roi_pct, risk))
        .transpose()?;

    Ok(HorizonAnalysis {
        downpayment: round2(downpayment),
        total_income: round2(total_income),
        total_expense: round2(total_expense),
        net_profit: round2(net_profit),
        roi_pct,
        verdict,
    })
}
