//! Study-block processing and GPA estimation.
//!
//! A block's GPA is the mean of the grade points of each course's projected
//! letter, looked up in a point table. Two tables are applied per block: a
//! nine-point local scale and the US four-point scale.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::course::{process_course, ProcessedCourse};
use crate::model::{Account, Grade, StudyBlock};
use crate::scale::GradeScale;

/// Letter reported when a GPA does not land on any entry of its table.
pub const UNKNOWN_GPA_LETTER: &str = "Unknown";

/// One row of a grade point table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradePoint {
    pub letter: String,
    pub points: f64,
}

/// Letter → grade point table. Order matters: reverse lookups return the
/// first letter carrying a given point value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GpaScale {
    entries: Vec<GradePoint>,
}

impl GpaScale {
    pub fn new(entries: Vec<GradePoint>) -> Self {
        Self { entries }
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(letter, points)| GradePoint {
                    letter: letter.to_string(),
                    points: *points,
                })
                .collect(),
        )
    }

    /// The nine-point scale, A+ = 9 down to C- = 1.
    pub fn nine_point() -> Self {
        Self::from_pairs(&[
            ("A+", 9.0),
            ("A", 8.0),
            ("A-", 7.0),
            ("B+", 6.0),
            ("B", 5.0),
            ("B-", 4.0),
            ("C+", 3.0),
            ("C", 2.0),
            ("C-", 1.0),
        ])
    }

    /// The US four-point scale.
    pub fn us_four_point() -> Self {
        Self::from_pairs(&[
            ("A+", 4.0),
            ("A", 4.0),
            ("A-", 3.7),
            ("B+", 3.3),
            ("B", 3.0),
            ("B-", 2.7),
            ("C+", 2.3),
            ("C", 2.0),
            ("C-", 1.7),
        ])
    }

    /// Points for `letter`, if the table has it.
    pub fn points_for(&self, letter: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.letter == letter)
            .map(|e| e.points)
    }

    /// First letter whose points equal `points` exactly.
    pub fn letter_for(&self, points: f64) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.points == points)
            .map(|e| e.letter.as_str())
    }

    pub fn entries(&self) -> &[GradePoint] {
        &self.entries
    }
}

/// The pair of point tables applied to every block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaScales {
    #[serde(default = "GpaScale::nine_point")]
    pub local: GpaScale,
    #[serde(default = "GpaScale::us_four_point")]
    pub us: GpaScale,
}

impl Default for GpaScales {
    fn default() -> Self {
        Self {
            local: GpaScale::nine_point(),
            us: GpaScale::us_four_point(),
        }
    }
}

/// Estimate a GPA from the projected letters of `courses`.
///
/// Courses whose letter is missing from the table add nothing to the total
/// but still count in the divisor. The letter is the reverse lookup of the
/// floored average. The result never reports `is_unknown`. With no courses
/// the average is reported as `0.0` with the unknown letter.
pub fn calculate_gpa_based_on_table(courses: &[ProcessedCourse], scale: &GpaScale) -> Grade {
    if courses.is_empty() {
        return Grade {
            numerical: 0.0,
            letter: UNKNOWN_GPA_LETTER.to_string(),
            is_unknown: false,
        };
    }

    let total: f64 = courses
        .iter()
        .filter_map(|c| scale.points_for(&c.grades.projected.letter))
        .sum();
    let numerical = total / courses.len() as f64;

    Grade {
        letter: scale
            .letter_for(numerical.floor())
            .unwrap_or(UNKNOWN_GPA_LETTER)
            .to_string(),
        numerical,
        is_unknown: false,
    }
}

/// A study block with every course processed and GPA estimates attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedStudyBlock {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub processed_courses: Vec<ProcessedCourse>,
    /// Estimate on the local nine-point scale.
    pub gpa_estimate: Grade,
    /// Estimate on the US four-point scale.
    pub us_gpa_estimate: Grade,
}

impl ProcessedStudyBlock {
    /// Number of courses whose every component is fully graded.
    pub fn completed_courses(&self) -> usize {
        self.processed_courses
            .iter()
            .filter(|c| c.status.is_completed)
            .count()
    }
}

/// Process a block with the default GPA tables.
pub fn process_study_block(block: &StudyBlock, scale: &GradeScale) -> ProcessedStudyBlock {
    process_study_block_with(block, scale, &GpaScales::default())
}

/// Process a block with explicit GPA tables.
pub fn process_study_block_with(
    block: &StudyBlock,
    scale: &GradeScale,
    gpa: &GpaScales,
) -> ProcessedStudyBlock {
    let processed_courses: Vec<ProcessedCourse> = block
        .courses
        .iter()
        .map(|c| process_course(c, scale))
        .collect();

    let gpa_estimate = calculate_gpa_based_on_table(&processed_courses, &gpa.local);
    let us_gpa_estimate = calculate_gpa_based_on_table(&processed_courses, &gpa.us);

    tracing::debug!(
        block = %block.id,
        courses = processed_courses.len(),
        gpa = gpa_estimate.numerical,
        "processed study block"
    );

    ProcessedStudyBlock {
        id: block.id.clone(),
        name: block.name.clone(),
        start_date: block.start_date,
        end_date: block.end_date,
        processed_courses,
        gpa_estimate,
        us_gpa_estimate,
    }
}

/// An account with all of its blocks processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedAccount {
    pub grade_scale: GradeScale,
    pub processed_study_blocks: Vec<ProcessedStudyBlock>,
}

/// Process every block of an account against the account's grade scale.
pub fn process_account(account: &Account, gpa: &GpaScales) -> ProcessedAccount {
    ProcessedAccount {
        grade_scale: account.grade_scale.clone(),
        processed_study_blocks: account
            .study_blocks
            .iter()
            .map(|b| process_study_block_with(b, &account.grade_scale, gpa))
            .collect(),
    }
}
