use std::collections::HashMap;

use serde::Serialize;

use super::filter::FilteredView;
use crate::error::EmptyResultError;

/// Condition label counted by [`SummaryMetrics::pct_foreign_used`], lower-case.
pub const FOREIGN_USED: &str = "foreign used";

// ---------------------------------------------------------------------------
// Summary metrics (the four KPI tiles)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    /// Number of visible listings.
    pub count: usize,
    /// Mean price in Naira, rounded half to even.
    pub avg_price: i64,
    /// Most frequent make; ties go to the make seen first.
    pub mode_make: String,
    /// Share of "foreign used" listings in percent, two decimals.
    pub pct_foreign_used: f64,
}

/// Compute the summary metrics of a filtered view.
///
/// Every metric but `count` is undefined on an empty view, so that case is an
/// [`EmptyResultError`] rather than a NaN.
pub fn summarize(view: &FilteredView<'_>) -> Result<SummaryMetrics, EmptyResultError> {
    let count = view.len();
    if count == 0 {
        return Err(EmptyResultError::new("summary metrics"));
    }

    let total: f64 = view.iter().map(|l| l.price).sum();
    let avg_price = (total / count as f64).round_ties_even() as i64;

    let mode_make = mode_first_seen(view.iter().map(|l| l.make.as_str()))
        .ok_or(EmptyResultError::new("most common make"))?
        .to_string();

    let foreign = view.iter().filter(|l| is_foreign_used(&l.condition)).count();
    let pct_foreign_used = round_to(foreign as f64 / count as f64 * 100.0, 2);

    Ok(SummaryMetrics {
        count,
        avg_price,
        mode_make,
        pct_foreign_used,
    })
}

/// Case-insensitive match against [`FOREIGN_USED`]; blanks are significant.
pub fn is_foreign_used(condition: &str) -> bool {
    condition.to_lowercase() == FOREIGN_USED
}

/// Most frequent item; among equally frequent items the first one seen wins.
pub fn mode_first_seen<'a>(items: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut order: Vec<&'a str> = Vec::new();
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for item in items {
        let n = counts.entry(item).or_insert(0);
        if *n == 0 {
            order.push(item);
        }
        *n += 1;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for item in order {
        let n = counts[item];
        match best {
            Some((_, m)) if n <= m => {}
            _ => best = Some((item, n)),
        }
    }
    best.map(|(item, _)| item)
}

/// Round to `decimals` places, half to even on the exact binary value.
///
/// Scaling by a power of ten first would round `14.374999999999998` up to
/// `14.38`; formatting rounds the stored value itself.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Display helpers for the KPI tiles
// ---------------------------------------------------------------------------

/// `2500000` → `"₦2,500,000"`.
pub fn format_naira(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}₦{grouped}")
}

/// `50.0` → `"50.00%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}
