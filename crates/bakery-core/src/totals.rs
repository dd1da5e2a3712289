use bakery_domain::{Amounted, Ledger};

/// Pure aggregation over a ledger's amounts.
pub struct LedgerTotals;

impl LedgerTotals {
    /// Sums every amount in the ledger. Negative and zero amounts are included as-is.
    pub fn total(ledger: &Ledger) -> f64 {
        Self::sum(ledger.iter())
    }

    /// Sums the amounts of any sequence of amounted items; `0.0` when empty.
    pub fn sum<'a, T, I>(items: I) -> f64
    where
        T: Amounted + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        // `Iterator::sum` on floats starts from -0.0.
        items.into_iter().fold(0.0, |acc, item| acc + item.amount())
    }
}
