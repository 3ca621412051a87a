//! The `tfquiz validate` command.

use anyhow::{Context, Result};

use tfquiz_core::loader::{validate_question_set, LoadOptions, QuestionSet};
use tfquiz_io::source_from_location;

pub async fn execute(location: String, coerce_missing_answer: bool) -> Result<()> {
    let source = source_from_location(&location)?;
    let options = LoadOptions {
        coerce_missing_answer,
    };
    let set = QuestionSet::load(source.as_ref(), options)
        .await
        .with_context(|| format!("could not load questions from {location}"))?;

    println!("Question set: {} ({} questions)", location, set.len());

    let warnings = validate_question_set(&set);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question set valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
