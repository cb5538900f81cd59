//! TOML study block parser.
//!
//! Loads study blocks from TOML files and directories, and validates them.
//! The engine itself assumes well-formed input; `validate_study_block` is the
//! place where authoring mistakes get reported.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{default_color, singular_label, Component, Course, StudyBlock, Subcomponent};

/// Intermediate TOML structure for parsing study block files.
#[derive(Debug, Deserialize)]
struct TomlBlockFile {
    study_block: TomlBlockHeader,
    #[serde(default)]
    courses: Vec<TomlCourse>,
}

#[derive(Debug, Deserialize)]
struct TomlBlockHeader {
    #[serde(default)]
    id: Option<String>,
    name: String,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    #[serde(default)]
    id: Option<String>,
    code_name: String,
    #[serde(default)]
    code_number: String,
    #[serde(default)]
    long_name: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    components: Vec<TomlComponent>,
}

#[derive(Debug, Deserialize)]
struct TomlComponent {
    #[serde(default)]
    id: Option<String>,
    name: String,
    weighting: f64,
    #[serde(default)]
    drop_lowest: usize,
    /// Total item count; missing items are added as pending.
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    subcomponents: Vec<TomlSubcomponent>,
    #[serde(default)]
    scores: Vec<TomlScore>,
}

#[derive(Debug, Deserialize)]
struct TomlSubcomponent {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    percentage: f64,
    #[serde(default = "default_true")]
    completed: bool,
}

/// Shorthand score entry: a number, or the string `"pending"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlScore {
    Graded(f64),
    Marker(String),
}

fn default_true() -> bool {
    true
}

const PENDING_MARKER: &str = "pending";

/// Parse a single TOML file into a `StudyBlock`.
pub fn parse_study_block(path: &Path) -> Result<StudyBlock> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read study block file: {}", path.display()))?;

    parse_study_block_str(&content, path)
}

/// Parse a TOML string into a `StudyBlock` (useful for testing).
pub fn parse_study_block_str(content: &str, source_path: &Path) -> Result<StudyBlock> {
    let parsed: TomlBlockFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let header = parsed.study_block;
    let block_id = header.id.unwrap_or_else(|| slugify(&header.name));
    let start_date = parse_date(&header.start_date, "start_date")?;
    let end_date = parse_date(&header.end_date, "end_date")?;

    let courses = parsed
        .courses
        .into_iter()
        .map(|c| build_course(c, &block_id))
        .collect::<Result<Vec<_>>>()?;

    Ok(StudyBlock {
        id: block_id,
        name: header.name,
        start_date,
        end_date,
        courses,
    })
}

fn build_course(course: TomlCourse, block_id: &str) -> Result<Course> {
    let id = course
        .id
        .unwrap_or_else(|| slugify(&format!("{}{}", course.code_name, course.code_number)));

    let components = course
        .components
        .into_iter()
        .map(|c| build_component(c, &id))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("in course '{id}'"))?;

    Ok(Course {
        id,
        study_block_id: block_id.to_string(),
        course_code_name: course.code_name,
        course_code_number: course.code_number,
        long_name: course.long_name,
        color: course.color.unwrap_or_else(default_color),
        components,
    })
}

fn build_component(component: TomlComponent, course_id: &str) -> Result<Component> {
    let id = component
        .id
        .unwrap_or_else(|| format!("{course_id}-{}", slugify(&component.name)));

    let mut items: Vec<(Option<String>, f64, bool)> = component
        .subcomponents
        .into_iter()
        .map(|s| (s.name, s.percentage, s.completed))
        .collect();

    for score in component.scores {
        match score {
            TomlScore::Graded(value) => items.push((None, value, true)),
            TomlScore::Marker(marker) if marker.eq_ignore_ascii_case(PENDING_MARKER) => {
                items.push((None, 0.0, false))
            }
            TomlScore::Marker(other) => anyhow::bail!(
                "component '{}': unknown score '{other}' (expected a number or \"{PENDING_MARKER}\")",
                component.name
            ),
        }
    }

    if let Some(count) = component.count {
        while items.len() < count {
            items.push((None, 0.0, false));
        }
    }

    let label = singular_label(&component.name).unwrap_or(component.name.as_str());
    let single = items.len() == 1;
    let subcomponents = items
        .into_iter()
        .enumerate()
        .map(|(i, (name, percentage, completed))| Subcomponent {
            id: format!("{id}-{}", i + 1),
            name: name.unwrap_or_else(|| {
                if single {
                    component.name.clone()
                } else {
                    format!("{label} {}", i + 1)
                }
            }),
            grade_value_percentage: percentage,
            is_completed: completed,
        })
        .collect();

    Ok(Component {
        id,
        name: component.name,
        subject_weighting: component.weighting,
        number_of_subcomponents_to_drop_lowest: component.drop_lowest,
        subcomponents,
    })
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid {field} '{value}', expected YYYY-MM-DD"))
}

/// Lowercase, alphanumerics kept, everything else collapsed to single dashes.
fn slugify(s: &str) -> String {
    let mut slug = String::new();
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Recursively load all `.toml` study block files from a directory.
pub fn load_block_directory(dir: &Path) -> Result<Vec<StudyBlock>> {
    let mut blocks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            blocks.extend(load_block_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_study_block(&path) {
                Ok(block) => blocks.push(block),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(blocks)
}

/// Load a single file, or every block under a directory.
pub fn load_blocks(path: &Path) -> Result<Vec<StudyBlock>> {
    if path.is_dir() {
        load_block_directory(path)
    } else {
        Ok(vec![parse_study_block(path)?])
    }
}

/// A warning from study block validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The course ID (if applicable).
    pub course_id: Option<String>,
    /// Warning message.
    pub message: String,
}

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Validate a study block for common authoring issues.
pub fn validate_study_block(block: &StudyBlock) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if block.end_date < block.start_date {
        warnings.push(ValidationWarning {
            course_id: None,
            message: format!(
                "end date {} is before start date {}",
                block.end_date, block.start_date
            ),
        });
    }

    // Check for duplicate course IDs
    let mut seen_ids = std::collections::HashSet::new();
    for course in &block.courses {
        if !seen_ids.insert(&course.id) {
            warnings.push(ValidationWarning {
                course_id: Some(course.id.clone()),
                message: format!("duplicate course ID: {}", course.id),
            });
        }
    }

    for course in &block.courses {
        let warn = |warnings: &mut Vec<ValidationWarning>, message: String| {
            warnings.push(ValidationWarning {
                course_id: Some(course.id.clone()),
                message,
            });
        };

        if course.components.is_empty() {
            warn(&mut warnings, "course has no components".into());
            continue;
        }

        let total_weight: f64 = course.components.iter().map(|c| c.subject_weighting).sum();
        if (total_weight - 1.0).abs() > WEIGHT_TOLERANCE {
            warn(
                &mut warnings,
                format!("component weights sum to {total_weight:.4}, expected 1"),
            );
        }

        for component in &course.components {
            if !(0.0..=1.0).contains(&component.subject_weighting) {
                warn(
                    &mut warnings,
                    format!(
                        "component '{}' has weighting {} outside [0, 1]",
                        component.name, component.subject_weighting
                    ),
                );
            }

            if component.number_of_subcomponents_to_drop_lowest > component.subcomponents.len() {
                warn(
                    &mut warnings,
                    format!(
                        "component '{}' drops {} of only {} items",
                        component.name,
                        component.number_of_subcomponents_to_drop_lowest,
                        component.subcomponents.len()
                    ),
                );
            }

            for sub in &component.subcomponents {
                if !(0.0..=1.0).contains(&sub.grade_value_percentage) {
                    warn(
                        &mut warnings,
                        format!(
                            "'{}' in '{}' has score {} outside [0, 1]",
                            sub.name, component.name, sub.grade_value_percentage
                        ),
                    );
                }
            }
        }
    }

    warnings
}
