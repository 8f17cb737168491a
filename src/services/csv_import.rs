// src/services/csv_import.rs
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use serde::Serialize;

use crate::models::{Downpayment, Expenses, NoiAnalysis, NoiInput};
use crate::services::calculations::analyze_noi;
use crate::services::error::{AnalysisError, AnalysisResult};

/// Outcome for one CSV row. Rows are numbered from 1, header excluded.
#[derive(Debug, Clone, Serialize)]
pub struct RowOutcome {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<NoiAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

struct Columns {
    price: usize,
    expected_rent: usize,
    expenses: (usize, fn(f64) -> Expenses),
    downpayment: usize,
    location: usize,
    sqft: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> AnalysisResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        let require = |name: &str| {
            find(name).ok_or_else(|| AnalysisError::invalid(format!("No '{}' column in CSV", name)))
        };

        let expenses = match (find("annual_expenses"), find("monthly_expenses")) {
            (Some(idx), _) => (idx, Expenses::annual as fn(f64) -> Expenses),
            (None, Some(idx)) => (idx, Expenses::monthly as fn(f64) -> Expenses),
            (None, None) => {
                return Err(AnalysisError::invalid(
                    "No 'annual_expenses' or 'monthly_expenses' column in CSV",
                ))
            }
        };

        Ok(Columns {
            price: require("price")?,
            expected_rent: require("expected_rent")?,
            expenses,
            downpayment: require("downpayment")?,
            location: require("location")?,
            sqft: require("sqft")?,
        })
    }

    fn number(record: &StringRecord, idx: usize, name: &str) -> AnalysisResult<f64> {
        let cell = record
            .get(idx)
            .ok_or_else(|| AnalysisError::invalid(format!("Missing '{}' field", name)))?
            .trim();
        cell.parse::<f64>()
            .map_err(|_| AnalysisError::invalid(format!("'{}' is not a number: {:?}", name, cell)))
    }

    fn input(&self, record: &StringRecord) -> AnalysisResult<NoiInput> {
        let (expense_idx, expenses) = self.expenses;
        Ok(NoiInput {
            purchase_price: Self::number(record, self.price, "price")?,
            monthly_rent: Self::number(record, self.expected_rent, "expected_rent")?,
            expenses: expenses(Self::number(record, expense_idx, "expenses")?),
            downpayment: Downpayment::Amount(Self::number(record, self.downpayment, "downpayment")?),
            location: record.get(self.location).unwrap_or_default().trim().to_string(),
            size_sqft: Self::number(record, self.sqft, "sqft")?,
        })
    }
}

/// Parse a CSV of properties into analysis inputs. A bad header fails the
/// whole file; a bad row fails only that row.
pub fn parse_properties(csv_text: &str) -> AnalysisResult<Vec<(usize, AnalysisResult<NoiInput>)>> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| AnalysisError::invalid(format!("Unreadable CSV header: {}", e)))?
        .clone();
    let columns = Columns::locate(&headers)?;

    let rows = rdr
        .records()
        .enumerate()
        .map(|(i, record)| {
            let input = record
                .map_err(|e| AnalysisError::invalid(format!("Unreadable CSV row: {}", e)))
                .and_then(|r| columns.input(&r));
            (i + 1, input)
        })
        .collect();
    Ok(rows)
}

/// Analyze every property in the uploaded CSV.
pub fn analyze_csv(csv_text: &str) -> AnalysisResult<Vec<RowOutcome>> {
    let rows = parse_properties(csv_text)?;
    info!("Analyzing {} properties from CSV", rows.len());

    let outcomes = rows
        .into_iter()
        .map(|(row, input)| {
            let location = input.as_ref().ok().map(|i| i.location.clone());
            match input.and_then(|i| analyze_noi(&i)) {
                Ok(result) => RowOutcome { row, location, result: Some(result), error: None },
                Err(e) => {
                    warn!("CSV row {} skipped: {}", row, e);
                    RowOutcome { row, location, result: None, error: Some(e.to_string()) }
                }
            }
        })
        .collect();
    Ok(outcomes)
}
