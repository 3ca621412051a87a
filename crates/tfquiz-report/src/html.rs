//! HTML result page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use tfquiz_core::result::QuizResult;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn answer_label(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Generate an HTML page from a quiz result.
pub fn generate_html(result: &QuizResult) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Quiz results: {}</title>\n",
        html_escape(&result.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Quiz results</h1>\n");
    html.push_str(&format!(
        "<p class=\"summary\">{}</p>\n",
        html_escape(&result.summary_line())
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{:.0}% correct | {}</p>\n",
        result.ratio() * 100.0,
        result.date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&score_bar(result));
    html.push_str("</header>\n");

    // Per-question answers
    html.push_str("<section class=\"answers\">\n");
    html.push_str("<h2>Answers</h2>\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>#</th><th>Question</th><th>Your answer</th><th>Correct answer</th><th>Explanation</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for answer in &result.answers {
        let class = if answer.given == answer.correct {
            "pass"
        } else {
            "fail"
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&answer.id.to_string()),
            html_escape(&answer.text),
            answer_label(answer.given),
            answer_label(answer.correct),
            html_escape(&answer.explanation),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(result).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML result page to a file.
pub fn write_html_report(result: &QuizResult, path: &Path) -> Result<()> {
    let html = generate_html(result);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn score_bar(result: &QuizResult) -> String {
    let max_width = 400;
    let height = 24;
    let ratio = result.ratio();
    let width = (ratio * max_width as f64) as usize;

    let color = if ratio >= 0.8 {
        "#22c55e"
    } else if ratio >= 0.5 {
        "#eab308"
    } else {
        "#ef4444"
    };

    format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"#e5e7eb\" rx=\"4\"/>\n  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n</svg>\n",
        max_width, height, max_width, height, width, height, color
    )
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.summary { font-size: 1.25rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tfquiz_core::model::{AnswerRecord, QuestionId};

    fn make_test_result() -> QuizResult {
        let date = chrono::Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let records = vec![
            AnswerRecord {
                question_id: QuestionId::Number(1),
                question_text: "Sky is blue".into(),
                given_answer: true,
                correct_answer: true,
                explanation: String::new(),
            },
            AnswerRecord {
                question_id: QuestionId::Number(2),
                question_text: "1 < 2 & 3 > 2".into(),
                given_answer: false,
                correct_answer: true,
                explanation: "Basic <ordering>.".into(),
            },
        ];
        QuizResult::new("Ada".into(), 1, 2, date, &records)
    }

    #[test]
    fn html_contains_required_elements() {
        let html = generate_html(&make_test_result());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Thanks Ada! You scored 1 out of 2."));
        assert!(html.contains("Sky is blue"));
        assert!(html.contains("50% correct"));
        assert!(html.contains("class=\"fail\""));
    }

    #[test]
    fn html_escapes_question_text() {
        let html = generate_html(&make_test_result());
        assert!(html.contains("1 &lt; 2 &amp; 3 &gt; 2"));
        assert!(!html.contains("<ordering>"));
    }

    #[test]
    fn html_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("quiz-results-Ada.html");

        write_html_report(&make_test_result(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }

    #[test]
    fn html_write_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("results");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_html_report(&make_test_result(), &blocker.join("report.html"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to create directory"));
        assert!(err.to_string().contains("results"));
    }
}
