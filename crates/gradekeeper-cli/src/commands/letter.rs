//! The `gradekeeper letter` command.

use std::path::PathBuf;

use anyhow::Result;

use gradekeeper_core::config::load_config_from;
use gradekeeper_core::scale::resolve_letter;

pub fn execute(score: f64, config: Option<PathBuf>) -> Result<()> {
    if !score.is_finite() {
        anyhow::bail!("score must be a finite number, got {score}");
    }
    let config = load_config_from(config.as_deref())?;
    println!("{}", resolve_letter(score, &config.grade_scale));
    Ok(())
}
