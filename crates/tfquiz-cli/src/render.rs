//! Terminal rendering of results.

use comfy_table::{Cell, Table};

use tfquiz_core::result::QuizResult;

fn answer_label(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// One row per answer: id, question, given, correct, verdict.
pub fn answer_table(result: &QuizResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct", "Result"]);

    for a in &result.answers {
        let verdict = if a.given == a.correct { "OK" } else { "WRONG" };
        table.add_row(vec![
            Cell::new(&a.id),
            Cell::new(&a.text),
            Cell::new(answer_label(a.given)),
            Cell::new(answer_label(a.correct)),
            Cell::new(verdict),
        ]);
    }

    table
}
