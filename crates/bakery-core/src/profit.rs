//! Headline profit/loss figures derived from the income and expense totals.

use std::fmt;

/// Display treatment selected by the sign of the profit percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfitClass {
    Negative,
    Zero,
    Positive,
}

impl fmt::Display for ProfitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProfitClass::Negative => "loss",
            ProfitClass::Zero => "break-even",
            ProfitClass::Positive => "profit",
        };
        f.write_str(label)
    }
}

pub struct ProfitCalculator;

impl ProfitCalculator {
    pub fn profit(income_total: f64, expense_total: f64) -> f64 {
        income_total - expense_total
    }

    /// Profit as a percentage of income; exactly `0.0` when income is exactly zero.
    pub fn profit_percentage(income_total: f64, expense_total: f64) -> f64 {
        if income_total == 0.0 {
            return 0.0;
        }
        (Self::profit(income_total, expense_total) / income_total) * 100.0
    }

    /// NaN has no sign and falls through to [`ProfitClass::Zero`].
    pub fn classify(percentage: f64) -> ProfitClass {
        if percentage < 0.0 {
            ProfitClass::Negative
        } else if percentage > 0.0 {
            ProfitClass::Positive
        } else {
            ProfitClass::Zero
        }
    }
}

/// Snapshot of the profit/loss figures for one pair of totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitSummary {
    pub income_total: f64,
    pub expense_total: f64,
    pub profit: f64,
    pub percentage: f64,
    pub classification: ProfitClass,
}

impl ProfitSummary {
    pub fn from_totals(income_total: f64, expense_total: f64) -> Self {
        let percentage = ProfitCalculator::profit_percentage(income_total, expense_total);
        Self {
            income_total,
            expense_total,
            profit: ProfitCalculator::profit(income_total, expense_total),
            percentage,
            classification: ProfitCalculator::classify(percentage),
        }
    }
}
