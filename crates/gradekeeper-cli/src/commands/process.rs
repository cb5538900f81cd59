//! The `gradekeeper process` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use gradekeeper_core::block::ProcessedStudyBlock;
use gradekeeper_core::config::load_config_from;
use gradekeeper_core::model::Grade;
use gradekeeper_core::parser::load_blocks;
use gradekeeper_core::report::BlockReport;
use gradekeeper_report::html::write_html_report;

pub fn execute(
    block_path: PathBuf,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let blocks = load_blocks(&block_path)?;
    if blocks.is_empty() {
        anyhow::bail!("no study blocks found in {}", block_path.display());
    }

    let report = BlockReport::build(&blocks, &config.grade_scale, &config.gpa);
    tracing::info!(
        blocks = report.blocks.len(),
        courses = report.course_count(),
        "processed study blocks"
    );

    for block in &report.blocks {
        print_block(block);
    }

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    let output = output.unwrap_or(config.output_dir);
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "text" => {}
            "json" => {
                let path = output.join(format!("grades-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("grades-{timestamp}.html"));
                write_html_report(&report, &path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn grade_text(grade: &Grade) -> String {
    if grade.is_unknown {
        "-".to_string()
    } else {
        format!("{:.2}% {}", grade.numerical * 100.0, grade.letter)
    }
}

fn print_block(block: &ProcessedStudyBlock) {
    println!(
        "\n{} ({} to {})",
        block.name, block.start_date, block.end_date
    );

    let mut table = Table::new();
    table.set_header(vec!["Course", "Actual", "Projected", "Maximum", "Remaining"]);

    for course in &block.processed_courses {
        let remaining = if course.status.is_completed {
            "completed".to_string()
        } else {
            course
                .status
                .components_remaining
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![
            Cell::new(course.course.code()),
            Cell::new(grade_text(&course.grades.actual)),
            Cell::new(grade_text(&course.grades.projected)),
            Cell::new(grade_text(&course.grades.maximum_possible)),
            Cell::new(remaining),
        ]);
    }

    println!("{table}");
    println!(
        "GPA estimate: {:.2} ({}) | US GPA estimate: {:.2} ({})",
        block.gpa_estimate.numerical,
        block.gpa_estimate.letter,
        block.us_gpa_estimate.numerical,
        block.us_gpa_estimate.letter
    );
}
