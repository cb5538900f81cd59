//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use gradekeeper_core::block::ProcessedStudyBlock;
use gradekeeper_core::course::ProcessedCourse;
use gradekeeper_core::model::Grade;
use gradekeeper_core::report::BlockReport;

use crate::color::{adjust_color, pick_text_color};

const LIGHT_TEXT: &str = "#ffffff";
const DARK_TEXT: &str = "#1a1a1a";

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Format a fraction as a percentage with four significant digits.
fn percent(value: f64) -> String {
    let pct = value * 100.0;
    let int_digits = if pct.abs() < 1.0 {
        1
    } else {
        pct.abs().log10().floor() as usize + 1
    };
    let decimals = 4usize.saturating_sub(int_digits);
    format!("{pct:.decimals$}%")
}

fn grade_cell(grade: &Grade) -> String {
    if grade.is_unknown {
        "<td class=\"unknown\">-</td>".to_string()
    } else {
        format!(
            "<td>{} <span class=\"letter\">{}</span></td>",
            percent(grade.numerical),
            html_escape(&grade.letter)
        )
    }
}

/// Generate an HTML report from a block report.
pub fn generate_html(report: &BlockReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>gradekeeper report</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>gradekeeper report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} study blocks | {} courses | {}</p>\n",
        report.blocks.len(),
        report.course_count(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Block</th><th>Dates</th><th>Courses</th><th>Completed</th><th>GPA</th><th>US GPA</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for block in &report.blocks {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{} to {}</td><td>{}</td><td>{}</td><td>{:.2} ({})</td><td>{:.2} ({})</td></tr>\n",
            html_escape(&block.name),
            block.start_date.format("%-d %b %Y"),
            block.end_date.format("%-d %b %Y"),
            block.processed_courses.len(),
            block.completed_courses(),
            block.gpa_estimate.numerical,
            html_escape(&block.gpa_estimate.letter),
            block.us_gpa_estimate.numerical,
            html_escape(&block.us_gpa_estimate.letter),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    for (i, block) in report.blocks.iter().enumerate() {
        html.push_str(&block_section(block, i));
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

fn block_section(block: &ProcessedStudyBlock, index: usize) -> String {
    let table_id = format!("block-{index}");
    let mut html = String::new();

    html.push_str("<section class=\"block\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&block.name)));

    if block.processed_courses.is_empty() {
        html.push_str("<p class=\"meta\">No courses.</p>\n</section>\n");
        return html;
    }

    html.push_str(&format!("<table class=\"courses\" id=\"{table_id}\">\n"));
    html.push_str(&format!(
        "<thead><tr><th onclick=\"sortTable('{table_id}', 0)\">Course</th><th onclick=\"sortTable('{table_id}', 1)\">Actual</th><th onclick=\"sortTable('{table_id}', 2)\">Projected</th><th onclick=\"sortTable('{table_id}', 3)\">Maximum</th><th>Remaining</th></tr></thead>\n"
    ));
    html.push_str("<tbody>\n");

    for course in &block.processed_courses {
        let background = &course.course.color;
        let text = pick_text_color(background, LIGHT_TEXT, DARK_TEXT);
        let remaining: Vec<String> = course
            .status
            .components_remaining
            .iter()
            .map(|c| html_escape(&c.name))
            .collect();
        let remaining = if course.status.is_completed {
            "<span class=\"done\">Completed</span>".to_string()
        } else {
            remaining.join(", ")
        };

        html.push_str(&format!(
            "<tr><td><span class=\"swatch\" style=\"background:{};color:{}\">{}</span> {}</td>{}{}{}<td>{}</td></tr>\n",
            html_escape(background),
            text,
            html_escape(&course.course.code()),
            html_escape(&course.course.long_name),
            grade_cell(&course.grades.actual),
            grade_cell(&course.grades.projected),
            grade_cell(&course.grades.maximum_possible),
            remaining,
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str(&progress_chart(&block.processed_courses));
    html.push_str("</section>\n");
    html
}

/// One bar per course: actual inside projected inside maximum possible.
fn progress_chart(courses: &[ProcessedCourse]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total_height = courses.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 80,
        total_height
    );

    for (i, course) in courses.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = |grade: &Grade| (grade.numerical.clamp(0.0, 1.0) * max_width as f64) as usize;
        let color = &course.course.color;
        let faded = adjust_color(color, 90).unwrap_or_else(|| "#e5e7eb".to_string());
        let muted = adjust_color(color, 45).unwrap_or_else(|| "#9ca3af".to_string());

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&course.course.code())
        ));
        for (grade, fill) in [
            (&course.grades.maximum_possible, faded.as_str()),
            (&course.grades.projected, muted.as_str()),
            (&course.grades.actual, color.as_str()),
        ] {
            if grade.is_unknown {
                continue;
            }
            svg.push_str(&format!(
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
                label_width,
                y,
                width(grade),
                bar_height,
                html_escape(fill)
            ));
        }
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + max_width + 8,
            y + bar_height / 2,
            percent(course.grades.projected.numerical)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &BlockReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --done: #dcfce7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --done: #064e3b; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.swatch { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 4px; font-weight: bold; }
.letter { color: #6b7280; }
.unknown { color: #9ca3af; }
.done { background: var(--done); padding: 0.1rem 0.4rem; border-radius: 4px; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(id, col) {
  const table = document.getElementById(id);
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    if (!isNaN(na) && !isNaN(nb)) return asc ? na - nb : nb - na;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
