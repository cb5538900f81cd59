//! Grade report types with JSON persistence and change detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::block::{process_study_block_with, GpaScales, ProcessedStudyBlock};
use crate::model::StudyBlock;
use crate::scale::GradeScale;

/// A snapshot of processed study blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Scale the letters were resolved with.
    pub grade_scale: GradeScale,
    /// Processed blocks, in input order.
    pub blocks: Vec<ProcessedStudyBlock>,
}

impl BlockReport {
    /// Process `blocks` into a fresh report.
    pub fn build(blocks: &[StudyBlock], scale: &GradeScale, gpa: &GpaScales) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            grade_scale: scale.clone(),
            blocks: blocks
                .iter()
                .map(|b| process_study_block_with(b, scale, gpa))
                .collect(),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: BlockReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Total number of courses across all blocks.
    pub fn course_count(&self) -> usize {
        self.blocks.iter().map(|b| b.processed_courses.len()).sum()
    }

    /// Compare this report's projected grades against a baseline.
    ///
    /// Courses are matched on `(block id, course id)`. Unknown projected
    /// grades compare as their `0.0` placeholder.
    pub fn compare(&self, baseline: &BlockReport, threshold: f64) -> GradeChangeReport {
        let baseline_grades = projected_map(baseline);
        let current_grades = projected_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_courses = 0usize;

        for (key, current) in &current_grades {
            let Some(baseline_entry) = baseline_grades.get(key) else {
                new_courses += 1;
                continue;
            };
            let delta = current.numerical - baseline_entry.numerical;
            let change = GradeChange {
                block_id: key.0.clone(),
                course_id: key.1.clone(),
                course_code: current.code.clone(),
                baseline_grade: baseline_entry.numerical,
                current_grade: current.numerical,
                baseline_letter: baseline_entry.letter.clone(),
                current_letter: current.letter.clone(),
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_courses = baseline_grades
            .keys()
            .filter(|k| !current_grades.contains_key(k))
            .count();

        regressions.sort_by(|a, b| {
            a.delta
                .total_cmp(&b.delta)
                .then_with(|| a.key().cmp(&b.key()))
        });
        improvements.sort_by(|a, b| {
            b.delta
                .total_cmp(&a.delta)
                .then_with(|| a.key().cmp(&b.key()))
        });

        GradeChangeReport {
            regressions,
            improvements,
            unchanged,
            new_courses,
            removed_courses,
        }
    }
}

struct ProjectedEntry {
    code: String,
    numerical: f64,
    letter: String,
}

fn projected_map(report: &BlockReport) -> HashMap<(String, String), ProjectedEntry> {
    let mut map = HashMap::new();
    for block in &report.blocks {
        for course in &block.processed_courses {
            map.insert(
                (block.id.clone(), course.course.id.clone()),
                ProjectedEntry {
                    code: course.course.code(),
                    numerical: course.grades.projected.numerical,
                    letter: course.grades.projected.letter.clone(),
                },
            );
        }
    }
    map
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeChangeReport {
    /// Courses whose projected grade went down, largest drop first.
    pub regressions: Vec<GradeChange>,
    /// Courses whose projected grade went up, largest gain first.
    pub improvements: Vec<GradeChange>,
    /// Courses with no significant change.
    pub unchanged: usize,
    /// Courses in current but not baseline.
    pub new_courses: usize,
    /// Courses in baseline but not current.
    pub removed_courses: usize,
}

/// A change in one course's projected grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeChange {
    pub block_id: String,
    pub course_id: String,
    pub course_code: String,
    pub baseline_grade: f64,
    pub current_grade: f64,
    pub baseline_letter: String,
    pub current_letter: String,
    pub delta: f64,
}

impl GradeChange {
    fn key(&self) -> (&str, &str) {
        (&self.block_id, &self.course_id)
    }
}

impl GradeChangeReport {
    /// Format the change report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.regressions.is_empty() {
            md.push_str("### Regressions\n\n");
            md.push_str(&changes_table(&self.regressions));
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str(&changes_table(&self.improvements));
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

fn changes_table(changes: &[GradeChange]) -> String {
    let mut md = String::new();
    md.push_str("| Block | Course | Baseline | Current | Delta |\n");
    md.push_str("|-------|--------|----------|---------|-------|\n");
    for c in changes {
        md.push_str(&format!(
            "| {} | {} | {:.1}% ({}) | {:.1}% ({}) | {:+.1}% |\n",
            c.block_id,
            c.course_code,
            c.baseline_grade * 100.0,
            c.baseline_letter,
            c.current_grade * 100.0,
            c.current_letter,
            c.delta * 100.0
        ));
    }
    md
}
