//! Helpers that turn polars frames into the flat `f64` vectors
//! the boosting loop works with.
use polars::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{BoostError, Result};

use std::fmt;


/// Casts `series` to `f64` and collects it into an owned vector.
///
/// Nulls are rejected with [`BoostError::MissingValues`].
/// Values the cast cannot read as numbers (polars turns them into nulls)
/// and non-finite values are rejected with [`BoostError::InvalidValues`].
pub fn column_values(series: &Series) -> Result<Vec<f64>> {
    let n_null = series.null_count();
    if n_null > 0 {
        return Err(BoostError::MissingValues {
            column: series.name().to_string(),
            n_null,
        });
    }

    let casted = series.cast(&DataType::Float64)?;
    let values = casted.f64()?
        .into_iter()
        .map(|x| x.filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>();

    values.ok_or_else(|| {
        let n_invalid = casted.f64()
            .map(|ca| {
                ca.into_iter()
                    .filter(|x| !x.is_some_and(f64::is_finite))
                    .count()
            })
            .unwrap_or(casted.len());
        BoostError::InvalidValues {
            column: series.name().to_string(),
            n_invalid,
        }
    })
}


/// Extracts the first column of `target` as a flat vector.
/// Any further column is ignored.
pub fn target_values(target: &DataFrame) -> Result<Vec<f64>> {
    let columns = target.get_columns();
    let Some(first) = columns.first() else {
        return Err(BoostError::MissingTarget(
            "the target frame has no columns".into()
        ));
    };

    if columns.len() > 1 {
        log::warn!(
            "target frame has {} columns, only `{}` is used",
            columns.len(),
            first.name(),
        );
    }

    column_values(first)
}


/// Ordered column names and dtypes of a feature frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<(String, String)>,
}


impl FeatureSchema {
    /// Records the schema of `data`.
    pub fn of(data: &DataFrame) -> Self {
        let columns = data.get_columns()
            .iter()
            .map(|s| (s.name().to_string(), s.dtype().to_string()))
            .collect();
        Self { columns }
    }


    /// Number of feature columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }


    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }


    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(name, _)| name.as_str())
    }


    /// Fails with [`BoostError::SchemaMismatch`]
    /// unless `data` has exactly this schema.
    pub fn check(&self, data: &DataFrame) -> Result<()> {
        let other = Self::of(data);
        if *self != other {
            return Err(BoostError::SchemaMismatch {
                expected: self.to_string(),
                actual: other.to_string(),
            });
        }
        Ok(())
    }
}


impl fmt::Display for FeatureSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.columns.iter()
            .map(|(name, dtype)| format!("{name}: {dtype}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{line}")
    }
}
