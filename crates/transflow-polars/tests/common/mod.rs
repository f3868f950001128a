//! Common test utilities for transflow-polars tests

use polars::prelude::*;

/// Two groups of ten sampled individuals out of a hundred
pub fn two_group_frame() -> DataFrame {
    df![
        "group_id" => ["A", "B"],
        "sampled_count" => [10i64, 10],
        "population_count" => [100.0, 100.0],
    ]
    .unwrap()
}

/// Linked pairs A->A=5, A->B=8, B->A=2, B->B=3
pub fn two_group_linkages() -> DataFrame {
    df![
        "group1_id" => ["A", "A", "B", "B"],
        "group2_id" => ["A", "B", "A", "B"],
        "observed_count" => [5i64, 8, 2, 3],
    ]
    .unwrap()
}

/// Value of `column` on the row for pairing `(group_1, group_2)`
pub fn value_for(df: &DataFrame, group_1: &str, group_2: &str, column: &str) -> f64 {
    let g1 = df.column("group1_id").unwrap().str().unwrap();
    let g2 = df.column("group2_id").unwrap().str().unwrap();
    let row = (0..df.height())
        .find(|&i| g1.get(i) == Some(group_1) && g2.get(i) == Some(group_2))
        .unwrap();
    df.column(column).unwrap().f64().unwrap().get(row).unwrap()
}
