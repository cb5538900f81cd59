//! Grade scale resolution: numeric score → letter grade.
//!
//! A scale is a set of inclusive lower cutoffs, each with a letter label.
//! Cutoffs are kept sorted numerically so lookup is a binary search.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ScaleError;

/// Letter reported when a score falls below every cutoff.
pub const FAILING_LETTER: &str = "F";

/// Mapping from numeric cutoff (a fraction) to letter label.
///
/// Serialized as a table keyed by the cutoff written as a string, e.g.
/// `{"0.9": "A+", "0.5": "C-"}`, which is how JSON and TOML carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct GradeScale {
    /// Ascending by cutoff, no duplicates, all finite.
    cutoffs: Vec<(f64, String)>,
}

impl GradeScale {
    /// Build a scale from `(cutoff, label)` pairs in any order.
    pub fn from_cutoffs<I, S>(entries: I) -> Result<Self, ScaleError>
    where
        I: IntoIterator<Item = (f64, S)>,
        S: Into<String>,
    {
        let mut cutoffs = Vec::new();
        for (cutoff, label) in entries {
            if !cutoff.is_finite() {
                return Err(ScaleError::NonFiniteCutoff(cutoff.to_string()));
            }
            cutoffs.push((cutoff, label.into()));
        }
        cutoffs.sort_by(|a, b| a.0.total_cmp(&b.0));

        for pair in cutoffs.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(ScaleError::DuplicateCutoff {
                    cutoff: pair[0].0,
                    first: pair[0].1.clone(),
                    second: pair[1].1.clone(),
                });
            }
        }

        Ok(Self { cutoffs })
    }

    /// A scale with no cutoffs; every score resolves to [`FAILING_LETTER`].
    pub fn empty() -> Self {
        Self {
            cutoffs: Vec::new(),
        }
    }

    /// Resolve a score to its letter: the label of the largest cutoff that is
    /// less than or equal to `score`, or `"F"` if there is none.
    pub fn resolve(&self, score: f64) -> String {
        let above = self.cutoffs.partition_point(|(cutoff, _)| *cutoff <= score);
        match above.checked_sub(1).map(|i| &self.cutoffs[i].1) {
            Some(label) if !label.is_empty() => label.clone(),
            _ => FAILING_LETTER.to_string(),
        }
    }

    /// Cutoffs in ascending order.
    pub fn cutoffs(&self) -> impl Iterator<Item = (f64, &str)> {
        self.cutoffs.iter().map(|(c, l)| (*c, l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cutoffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cutoffs.is_empty()
    }
}

/// Resolve `score` against `scale`. See [`GradeScale::resolve`].
pub fn resolve_letter(score: f64, scale: &GradeScale) -> String {
    scale.resolve(score)
}

impl Default for GradeScale {
    /// The A+ … E university scale.
    fn default() -> Self {
        let cutoffs = [
            (0.0, "E"),
            (0.4, "D"),
            (0.5, "C-"),
            (0.55, "C"),
            (0.6, "C+"),
            (0.65, "B-"),
            (0.7, "B"),
            (0.75, "B+"),
            (0.8, "A-"),
            (0.85, "A"),
            (0.9, "A+"),
        ];
        Self {
            cutoffs: cutoffs
                .iter()
                .map(|(c, l)| (*c, l.to_string()))
                .collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, String>> for GradeScale {
    type Error = ScaleError;

    fn try_from(table: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let entries = table
            .into_iter()
            .map(|(key, label)| {
                let cutoff: f64 = key
                    .trim()
                    .parse()
                    .map_err(|_| ScaleError::InvalidCutoff(key.clone()))?;
                if !cutoff.is_finite() {
                    return Err(ScaleError::NonFiniteCutoff(key));
                }
                Ok((cutoff, label))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cutoffs(entries)
    }
}

impl From<GradeScale> for BTreeMap<String, String> {
    fn from(scale: GradeScale) -> Self {
        scale
            .cutoffs
            .into_iter()
            .map(|(cutoff, label)| (cutoff.to_string(), label))
            .collect()
    }
}
