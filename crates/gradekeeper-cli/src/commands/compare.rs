//! The `gradekeeper compare` command.

use std::path::PathBuf;

use anyhow::Result;

use gradekeeper_core::report::{BlockReport, GradeChange};

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = BlockReport::load_json(&baseline_path)?;
    let current = BlockReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    print_change(r);
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    print_change(i);
                }
            }

            if report.new_courses > 0 {
                println!("\n{} new course(s)", report.new_courses);
            }
            if report.removed_courses > 0 {
                println!("{} removed course(s)", report.removed_courses);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_change(change: &GradeChange) {
    println!(
        "  {} ({}) {:.1}% {} -> {:.1}% {} ({:+.1}%)",
        change.course_code,
        change.block_id,
        change.baseline_grade * 100.0,
        change.baseline_letter,
        change.current_grade * 100.0,
        change.current_letter,
        change.delta * 100.0
    );
}
