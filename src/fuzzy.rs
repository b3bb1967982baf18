use crate::error::{DedupError, DedupResult};
use crate::record::{FieldValue, RecordTable};
use crate::similarity::{SimilarityScorer, TokenSortRatio};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Tables at least this tall are scanned in parallel, partitioned by outer
/// index. Sequential and parallel scans produce identical output.
const PARALLEL_ROW_THRESHOLD: usize = 100;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FuzzyConfig {
    pub given_name_field: String,
    pub surname_field: String,
    pub score_cutoff: u8,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        FuzzyConfig {
            given_name_field: "FirstName".to_string(),
            surname_field: "Surname".to_string(),
            score_cutoff: 90,
        }
    }
}

/// A reported pair of approximately matching records. `index_a < index_b`
/// always; the indices let downstream consumers land back on the source rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyMatchPair {
    pub index_a: usize,
    pub index_b: usize,
    pub given_name_a: FieldValue,
    pub surname_a: FieldValue,
    pub given_name_b: FieldValue,
    pub surname_b: FieldValue,
    pub score: u8,
}

///
/// Compares every unordered pair of records' concatenated full names with the
/// token-sort ratio and reports pairs scoring at or above `score_cutoff`.
/// Pairs are emitted in ascending `(i, j)` order, each unordered pair exactly
/// once, never a record against itself. Cost is O(n²) comparisons; callers
/// with large inputs are expected to pre-filter.
///
/// ## Arguments
///
/// * `table` - The records to compare. Never mutated.
/// * `config` - Field selectors and the similarity cutoff in `[0, 100]`.
///
pub fn find_fuzzy_duplicates(
    table: &RecordTable,
    config: &FuzzyConfig,
) -> DedupResult<Vec<FuzzyMatchPair>> {
    find_fuzzy_duplicates_with(table, config, &TokenSortRatio)
}

/// Same scan through any conforming [`SimilarityScorer`].
pub fn find_fuzzy_duplicates_with<S: SimilarityScorer + Sync>(
    table: &RecordTable,
    config: &FuzzyConfig,
    scorer: &S,
) -> DedupResult<Vec<FuzzyMatchPair>> {
    scan(table, config, scorer, None)
}

/// Cancellable variant: when `cancel` is raised the scan stops at the next
/// outer-index check and returns [`DedupError::Cancelled`], never a partial
/// result.
pub fn find_fuzzy_duplicates_with_cancel(
    table: &RecordTable,
    config: &FuzzyConfig,
    cancel: &AtomicBool,
) -> DedupResult<Vec<FuzzyMatchPair>> {
    scan(table, config, &TokenSortRatio, Some(cancel))
}

fn scan<S: SimilarityScorer + Sync>(
    table: &RecordTable,
    config: &FuzzyConfig,
    scorer: &S,
    cancel: Option<&AtomicBool>,
) -> DedupResult<Vec<FuzzyMatchPair>> {
    if config.score_cutoff > 100 {
        return Err(DedupError::invalid_config(
            "scoreCutoff must be in [0, 100]",
        ));
    }
    let given = table.resolve_field(&config.given_name_field)?;
    let surname = table.resolve_field(&config.surname_field)?;

    // One comparison key per record, built up front so the quadratic loop
    // never touches the table's cells again.
    let keys: Vec<String> = table
        .rows()
        .map(|row| format!("{} {}", row[given], row[surname]))
        .collect();

    if keys.len() >= PARALLEL_ROW_THRESHOLD {
        let partitions: DedupResult<Vec<Vec<FuzzyMatchPair>>> = (0..keys.len())
            .into_par_iter()
            .map(|i| {
                check_cancel(cancel)?;
                Ok(scan_outer(i, &keys, table, given, surname, config.score_cutoff, scorer))
            })
            .collect();
        let mut matches: Vec<FuzzyMatchPair> = partitions?.into_iter().flatten().collect();
        // canonical (i, j) order after merging partitions
        matches.sort_unstable_by_key(|pair| (pair.index_a, pair.index_b));
        Ok(matches)
    } else {
        let mut matches = Vec::new();
        for i in 0..keys.len() {
            check_cancel(cancel)?;
            matches.extend(scan_outer(
                i,
                &keys,
                table,
                given,
                surname,
                config.score_cutoff,
                scorer,
            ));
        }
        Ok(matches)
    }
}

fn check_cancel(cancel: Option<&AtomicBool>) -> DedupResult<()> {
    match cancel {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(DedupError::Cancelled),
        _ => Ok(()),
    }
}

fn scan_outer<S: SimilarityScorer>(
    i: usize,
    keys: &[String],
    table: &RecordTable,
    given: usize,
    surname: usize,
    cutoff: u8,
    scorer: &S,
) -> Vec<FuzzyMatchPair> {
    let mut found = Vec::new();
    for j in (i + 1)..keys.len() {
        let score = scorer.score(&keys[i], &keys[j]);
        if score >= cutoff {
            let (row_a, row_b) = (table.row(i), table.row(j));
            found.push(FuzzyMatchPair {
                index_a: i,
                index_b: j,
                given_name_a: row_a[given].clone(),
                surname_a: row_a[surname].clone(),
                given_name_b: row_b[given].clone(),
                surname_b: row_b[surname].clone(),
                score,
            });
        }
    }
    found
}
