//! The `gradekeeper init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradekeeper.toml").exists() {
        println!("gradekeeper.toml already exists, skipping.");
    } else {
        std::fs::write("gradekeeper.toml", SAMPLE_CONFIG)?;
        println!("Created gradekeeper.toml");
    }

    std::fs::create_dir_all("blocks")?;
    let example_path = std::path::Path::new("blocks/example.toml");
    if example_path.exists() {
        println!("blocks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BLOCK)?;
        println!("Created blocks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gradekeeper.toml to match your institution's grade scale");
    println!("  2. Run: gradekeeper validate --block blocks/example.toml");
    println!("  3. Run: gradekeeper process --block blocks --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradekeeper configuration

output_dir = "./gradekeeper-results"

# Lowest score (as a fraction) needed for each letter.
[grade_scale]
"0" = "E"
"0.4" = "D"
"0.5" = "C-"
"0.55" = "C"
"0.6" = "C+"
"0.65" = "B-"
"0.7" = "B"
"0.75" = "B+"
"0.8" = "A-"
"0.85" = "A"
"0.9" = "A+"

# Grade point tables used for the GPA estimates. Omit either table to use
# the built-in nine-point and US four-point scales.
# [[gpa.local]]
# letter = "A+"
# points = 9.0
"#;

const EXAMPLE_BLOCK: &str = r##"[study_block]
id = "example"
name = "Example Trimester"
start_date = "2024-02-26"
end_date = "2024-06-28"

[[courses]]
code_name = "COMP"
code_number = "102"
long_name = "Introduction to Programming"
color = "#3b82f6"

[[courses.components]]
name = "Assignments"
weighting = 0.3
drop_lowest = 1
scores = [0.92, 0.75, 0.88, "pending"]

[[courses.components]]
name = "Tests"
weighting = 0.3
scores = [0.71]

[[courses.components]]
name = "Exam"
weighting = 0.4
count = 1

[[courses]]
code_name = "MATH"
code_number = "151"
long_name = "Mathematics for Computing"
color = "#f97316"

[[courses.components]]
name = "Quizzes"
weighting = 0.2
drop_lowest = 2
count = 10
scores = [0.8, 1.0, 0.6, 0.9]

[[courses.components]]
name = "Midterm"
weighting = 0.3
scores = [0.68]

[[courses.components]]
name = "Exam"
weighting = 0.5
count = 1
"##;
