//! Markdown result summary.

use tfquiz_core::result::QuizResult;

/// Format a quiz result as markdown.
pub fn to_markdown(result: &QuizResult) -> String {
    let mut md = String::new();

    md.push_str(&format!("**{}**\n\n", result.summary_line()));
    md.push_str(&format!(
        "Finished {} ({:.0}% correct)\n\n",
        result.date.format("%Y-%m-%d %H:%M UTC"),
        result.ratio() * 100.0
    ));

    if result.answers.is_empty() {
        return md;
    }

    md.push_str("| # | Question | Given | Correct | Result |\n");
    md.push_str("|---|----------|-------|---------|--------|\n");
    for a in &result.answers {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            a.id,
            a.text.replace('|', "\\|"),
            a.given,
            a.correct,
            if a.given == a.correct { "ok" } else { "wrong" }
        ));
    }

    let explained: Vec<_> = result
        .answers
        .iter()
        .filter(|a| !a.explanation.is_empty())
        .collect();
    if !explained.is_empty() {
        md.push_str("\n### Explanations\n\n");
        for a in explained {
            md.push_str(&format!("- **{}**: {}\n", a.id, a.explanation));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tfquiz_core::model::{AnswerRecord, QuestionId};

    #[test]
    fn markdown_output() {
        let date = chrono::Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let records = vec![AnswerRecord {
            question_id: QuestionId::Text("fish".into()),
            question_text: "Fish can fly | swim".into(),
            given_answer: true,
            correct_answer: false,
            explanation: "Mostly not.".into(),
        }];
        let result = QuizResult::new("Ada".into(), 0, 1, date, &records);

        let md = to_markdown(&result);
        assert!(md.contains("Thanks Ada! You scored 0 out of 1."));
        assert!(md.contains("| fish | Fish can fly \\| swim | true | false | wrong |"));
        assert!(md.contains("- **fish**: Mostly not."));
    }

    #[test]
    fn empty_result_has_no_table() {
        let result = QuizResult::new("Ada".into(), 0, 0, chrono::Utc::now(), &[]);
        let md = to_markdown(&result);
        assert!(!md.contains("| # |"));
    }
}
