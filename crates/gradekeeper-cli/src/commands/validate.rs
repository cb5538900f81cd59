//! The `gradekeeper validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(block_path: PathBuf) -> Result<()> {
    let blocks = gradekeeper_core::parser::load_blocks(&block_path)?;

    let mut total_warnings = 0;

    for block in &blocks {
        println!(
            "Study block: {} ({} courses, {} to {})",
            block.name,
            block.courses.len(),
            block.start_date,
            block.end_date
        );

        let warnings = gradekeeper_core::parser::validate_study_block(block);
        for w in &warnings {
            let prefix = w
                .course_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All study blocks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
