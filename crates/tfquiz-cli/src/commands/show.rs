//! The `tfquiz show` command.

use std::path::PathBuf;

use anyhow::Result;

use tfquiz_core::result::QuizResult;
use tfquiz_report::markdown::to_markdown;

use crate::render::answer_table;

pub fn execute(result_path: PathBuf, format: String) -> Result<()> {
    let result = QuizResult::load_json(&result_path)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", to_markdown(&result));
        }
        "json" => {
            println!("{}", result.to_json_pretty()?);
        }
        _ => {
            // text format
            println!("{}", result.summary_line());
            println!("Finished: {}", result.date.format("%Y-%m-%d %H:%M:%S UTC"));
            if !result.answers.is_empty() {
                println!("{}", answer_table(&result));
            }
        }
    }

    Ok(())
}
