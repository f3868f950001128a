//! Reading the group and linkage tables

use crate::{Error, FlowColumns, Result};
use polars::prelude::*;
use transflow_estimate::{ObservedLinkage, PopulationGroup};

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))
}

fn null_at(name: &str, row: usize) -> Error {
    Error::NullValue {
        column: name.to_string(),
        row,
    }
}

/// Non-null string values
fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let col = column(df, name)?;
    match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.map(str::to_string).ok_or_else(|| null_at(name, row)))
            .collect(),
        dt => Err(Error::TypeMismatch {
            column: name.to_string(),
            expected: "string".to_string(),
            got: format!("{:?}", dt),
        }),
    }
}

/// Non-null, non-negative real values
fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = column(df, name)?;
    let dt = col.dtype();
    if !(dt.is_float() || dt.is_integer()) {
        return Err(Error::TypeMismatch {
            column: name.to_string(),
            expected: "numeric".to_string(),
            got: format!("{:?}", dt),
        });
    }
    let floats = col.cast(&DataType::Float64)?;
    floats
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| null_at(name, row)))
        .collect()
}

/// Non-null, non-negative whole counts
///
/// Float columns are accepted when every value is integral.
fn count_values(df: &DataFrame, name: &str) -> Result<Vec<u64>> {
    float_values(df, name)?
        .into_iter()
        .map(|v| {
            if v < 0.0 {
                Err(Error::from(transflow_core::Error::negative_value(name, v)))
            } else if v.fract() != 0.0 || !v.is_finite() {
                Err(Error::InvalidInput(format!(
                    "column {name} must hold whole counts, found {v}"
                )))
            } else {
                Ok(v as u64)
            }
        })
        .collect()
}

/// Read the group table
///
/// # Errors
/// Missing columns, non-numeric counts, nulls, negative or fractional
/// sampled counts.
pub fn groups_from_frame(df: &DataFrame, columns: &FlowColumns) -> Result<Vec<PopulationGroup>> {
    let ids = string_values(df, &columns.group_id)?;
    let sampled = count_values(df, &columns.sampled_count)?;
    let population = float_values(df, &columns.population_count)?;

    Ok(ids
        .into_iter()
        .zip(sampled)
        .zip(population)
        .map(|((id, sampled), population)| PopulationGroup::new(id, sampled, population))
        .collect())
}

/// Read the linkage table
pub fn linkages_from_frame(df: &DataFrame, columns: &FlowColumns) -> Result<Vec<ObservedLinkage>> {
    let group_1 = string_values(df, &columns.group1_id)?;
    let group_2 = string_values(df, &columns.group2_id)?;
    let counts = count_values(df, &columns.observed_count)?;

    Ok(group_1
        .into_iter()
        .zip(group_2)
        .zip(counts)
        .map(|((g1, g2), count)| ObservedLinkage::new(g1, g2, count))
        .collect())
}
