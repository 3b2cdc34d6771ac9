use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of a progressive scale.
///
/// A bracket covers `[min_income, max_income)`; the last bracket of a table
/// has no upper bound. `base_tax` is the cumulative tax owed at `min_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

/// Errors raised while building a [`BracketTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    FirstBoundNotZero(Decimal),

    #[error("bracket bounds must be strictly increasing ({previous} then {current})")]
    NonIncreasingBounds { previous: Decimal, current: Decimal },

    #[error("bracket rate must be non-negative, got {0}")]
    NegativeRate(Decimal),
}

/// An ordered progressive scale whose cumulative bases are derived from the
/// `(lower bound, rate)` pairs at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table from `(lower bound, marginal rate)` rows.
    ///
    /// The cumulative base of each row is the tax owed on the full width of
    /// every row below it.
    pub fn from_rates(rows: &[(Decimal, Decimal)]) -> Result<Self, BracketTableError> {
        let Some(&(first_bound, _)) = rows.first() else {
            return Err(BracketTableError::Empty);
        };
        if !first_bound.is_zero() {
            return Err(BracketTableError::FirstBoundNotZero(first_bound));
        }

        let mut brackets: Vec<TaxBracket> = Vec::with_capacity(rows.len());
        let mut base_tax = Decimal::ZERO;

        for (index, &(min_income, tax_rate)) in rows.iter().enumerate() {
            if tax_rate < Decimal::ZERO {
                return Err(BracketTableError::NegativeRate(tax_rate));
            }
            if let Some(previous) = brackets.last() {
                if min_income <= previous.min_income {
                    return Err(BracketTableError::NonIncreasingBounds {
                        previous: previous.min_income,
                        current: min_income,
                    });
                }
                base_tax += (min_income - previous.min_income) * previous.tax_rate;
            }
            let max_income = rows.get(index + 1).map(|&(next, _)| next);
            brackets.push(TaxBracket {
                min_income,
                max_income,
                tax_rate,
                base_tax,
            });
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the bracket that applies to `amount`.
    ///
    /// Amounts past the last finite bound fall into the unbounded last row.
    pub fn bracket_for(
        &self,
        amount: Decimal,
    ) -> &TaxBracket {
        self.brackets
            .iter()
            .find(|b| b.max_income.is_none_or(|max| amount < max))
            .unwrap_or_else(|| &self.brackets[self.brackets.len() - 1])
    }
}
