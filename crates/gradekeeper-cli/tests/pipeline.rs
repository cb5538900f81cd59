//! End-to-end pipeline tests: block files → processed report → JSON → comparison.

use std::path::Path;

use gradekeeper_core::block::GpaScales;
use gradekeeper_core::config::GradekeeperConfig;
use gradekeeper_core::parser::{load_blocks, validate_study_block};
use gradekeeper_core::report::BlockReport;
use gradekeeper_core::scale::GradeScale;
use gradekeeper_report::html::generate_html;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn sample_report() -> BlockReport {
    let blocks = load_blocks(Path::new("../../blocks")).unwrap();
    BlockReport::build(&blocks, &GradeScale::default(), &GpaScales::default())
}

#[test]
fn sample_blocks_are_valid() {
    let blocks = load_blocks(Path::new("../../blocks")).unwrap();
    assert_eq!(blocks.len(), 2);
    for block in &blocks {
        assert!(validate_study_block(block).is_empty(), "{}", block.name);
    }
}

#[test]
fn in_progress_course_grades() {
    let report = sample_report();
    let t1 = &report.blocks[0];
    assert_eq!(t1.id, "2024-t1");

    let comp = &t1.processed_courses[0];
    assert_eq!(comp.course.code(), "COMP 102");
    // Assignments keep 0.84 and 0.7 after the drop; the exam is pending.
    assert!(approx(comp.grades.actual.numerical, 0.385));
    assert!(approx(comp.grades.projected.numerical, 0.77));
    assert!(approx(comp.grades.maximum_possible.numerical, 0.885));
    assert_eq!(comp.grades.actual.letter, "E");
    assert_eq!(comp.grades.projected.letter, "B+");
    assert_eq!(comp.grades.maximum_possible.letter, "A");
    assert!(!comp.status.is_completed);
    assert_eq!(comp.status.components_remaining.len(), 1);
    assert_eq!(comp.status.components_remaining[0].name, "Exam");

    let assignments = comp.component("comp102-assignments").unwrap();
    assert!(approx(assignments.grades.projected.value, 0.77));
    assert!(!assignments.grades.projected.is_average);

    let math = &t1.processed_courses[1];
    assert!(math.status.is_completed);
    assert_eq!(math.grades.actual, math.grades.projected);
    assert_eq!(math.grades.projected.letter, "A+");
}

#[test]
fn block_gpa_estimates() {
    let report = sample_report();
    let t1 = &report.blocks[0];
    // B+ (6) and A+ (9) on the nine-point scale.
    assert!(approx(t1.gpa_estimate.numerical, 7.5));
    assert_eq!(t1.gpa_estimate.letter, "A-");
    assert!(approx(t1.us_gpa_estimate.numerical, 3.65));
    assert_eq!(t1.us_gpa_estimate.letter, "B");
    assert_eq!(t1.completed_courses(), 1);
}

#[test]
fn untouched_course_projects_from_fallback_weight() {
    let report = sample_report();
    let t2 = &report.blocks[1];
    let comp = &t2.processed_courses[0];

    // Nothing graded: the weighted sum is reported unscaled.
    assert_eq!(comp.grades.projected.numerical, 0.0);
    assert!(!comp.grades.projected.is_unknown);
    assert!(approx(comp.grades.maximum_possible.numerical, 1.0));
    assert_eq!(comp.status.components_remaining.len(), 3);
    assert_eq!(t2.gpa_estimate.letter, "Unknown");
}

#[test]
fn report_roundtrip_and_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let baseline = sample_report();
    let path = dir.path().join("baseline.json");
    baseline.save_json(&path).unwrap();
    let loaded = BlockReport::load_json(&path).unwrap();

    let unchanged = loaded.compare(&baseline, 0.01);
    assert_eq!(unchanged.unchanged, 3);
    assert!(!unchanged.has_regressions());

    // The exam comes back poorly.
    let mut blocks = load_blocks(Path::new("../../blocks")).unwrap();
    let exam = &mut blocks[0].courses[0].components[1].subcomponents[0];
    exam.grade_value_percentage = 0.3;
    exam.is_completed = true;
    let current = BlockReport::build(&blocks, &GradeScale::default(), &GpaScales::default());

    let changes = current.compare(&loaded, 0.01);
    assert_eq!(changes.regressions.len(), 1);
    let regression = &changes.regressions[0];
    assert_eq!(regression.course_id, "comp102");
    assert_eq!(regression.baseline_letter, "B+");
    // 0.5 * 0.77 + 0.5 * 0.3
    assert!(approx(regression.current_grade, 0.535));
    assert_eq!(regression.current_letter, "C-");
    assert_eq!(changes.unchanged, 2);
    assert!(changes.to_markdown().contains("COMP 102"));
}

#[test]
fn custom_config_flows_through_report() {
    let config: GradekeeperConfig = toml::from_str(
        r#"
[grade_scale]
"0" = "Fail"
"0.5" = "Pass"

[[gpa.local]]
letter = "Pass"
points = 1.0
"#,
    )
    .unwrap();
    let blocks = load_blocks(Path::new("../../blocks/trimester-1.toml")).unwrap();
    let report = BlockReport::build(&blocks, &config.grade_scale, &config.gpa);

    let t1 = &report.blocks[0];
    assert_eq!(t1.gpa_estimate.numerical, 1.0);
    assert_eq!(t1.gpa_estimate.letter, "Pass");

    let html = generate_html(&report);
    assert!(html.contains("Pass"));
    assert!(html.contains("MATH 151"));
}
