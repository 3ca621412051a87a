//! The exported result of a finished quiz, with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AnswerRecord, QuestionId};

/// A completed quiz, in the shape handed to external sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Participant name.
    pub name: String,
    /// Number of correct answers.
    pub score: usize,
    /// Number of questions in the set.
    pub total: usize,
    /// When the quiz was finished.
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    /// Every answer, in the order given.
    pub answers: Vec<ExportedAnswer>,
}

/// One answer in the exported record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedAnswer {
    pub id: QuestionId,
    pub text: String,
    pub given: bool,
    pub correct: bool,
    #[serde(default)]
    pub explanation: String,
}

impl From<&AnswerRecord> for ExportedAnswer {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            id: record.question_id.clone(),
            text: record.question_text.clone(),
            given: record.given_answer,
            correct: record.correct_answer,
            explanation: record.explanation.clone(),
        }
    }
}

impl From<&ExportedAnswer> for AnswerRecord {
    fn from(answer: &ExportedAnswer) -> Self {
        Self {
            question_id: answer.id.clone(),
            question_text: answer.text.clone(),
            given_answer: answer.given,
            correct_answer: answer.correct,
            explanation: answer.explanation.clone(),
        }
    }
}

impl QuizResult {
    pub fn new(
        name: String,
        score: usize,
        total: usize,
        date: DateTime<Utc>,
        answers: &[AnswerRecord],
    ) -> Self {
        Self {
            name,
            score,
            total,
            date,
            answers: answers.iter().map(ExportedAnswer::from).collect(),
        }
    }

    /// Convert the exported answers back into answer records.
    pub fn answer_records(&self) -> Vec<AnswerRecord> {
        self.answers.iter().map(AnswerRecord::from).collect()
    }

    /// `"Thanks <name>! You scored <score> out of <total>."`
    pub fn summary_line(&self) -> String {
        format!(
            "Thanks {}! You scored {} out of {}.",
            self.name, self.score, self.total
        )
    }

    /// Fraction of correct answers, 0.0 for an empty quiz.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }

    /// Default download name: `quiz-results-<name>.json`.
    ///
    /// Falls back to `user` for an empty name; characters that are unsafe in
    /// file names are replaced with `_`.
    pub fn file_name(&self) -> String {
        format!("quiz-results-{}.json", self.file_stem_name())
    }

    fn file_stem_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            return "user".to_string();
        }
        name.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Serialize as pretty-printed JSON (two-space indent).
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize quiz result")
    }

    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: QuizResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }
}

/// ISO-8601 UTC timestamps with millisecond precision, e.g. `2026-10-18T09:30:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|d| d.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn records() -> Vec<AnswerRecord> {
        vec![
            AnswerRecord {
                question_id: QuestionId::Number(1),
                question_text: "Sky is blue".into(),
                given_answer: true,
                correct_answer: true,
                explanation: String::new(),
            },
            AnswerRecord {
                question_id: QuestionId::Text("fish".into()),
                question_text: "Fish can fly".into(),
                given_answer: true,
                correct_answer: false,
                explanation: "Mostly not.".into(),
            },
        ]
    }

    fn make_result(name: &str) -> QuizResult {
        let date = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        QuizResult::new(name.into(), 1, 2, date, &records())
    }

    #[test]
    fn export_shape_matches_download_format() {
        let value = serde_json::to_value(make_result("Ada")).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["score"], 1);
        assert_eq!(value["total"], 2);
        assert_eq!(value["date"], "2026-10-18T09:30:00.000Z");
        assert_eq!(
            value["answers"][1],
            serde_json::json!({
                "id": "fish",
                "text": "Fish can fly",
                "given": true,
                "correct": false,
                "explanation": "Mostly not."
            })
        );
        assert_eq!(value["answers"][0]["id"], 1);
    }

    #[test]
    fn exported_answers_reproduce_every_record_field() {
        let result = make_result("Ada");
        let json = result.to_json_pretty().unwrap();
        let parsed: QuizResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.answer_records(), records());
        assert_eq!(parsed, result);
    }

    #[test]
    fn file_name_sanitizes_and_defaults() {
        assert_eq!(make_result("Ada").file_name(), "quiz-results-Ada.json");
        assert_eq!(make_result("").file_name(), "quiz-results-user.json");
        assert_eq!(
            make_result("Ada/../x y").file_name(),
            "quiz-results-Ada_.._x_y.json"
        );
    }

    #[test]
    fn summary_and_ratio() {
        let result = make_result("Ada");
        assert_eq!(result.summary_line(), "Thanks Ada! You scored 1 out of 2.");
        assert!((result.ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn json_file_roundtrip() {
        let result = make_result("Ada");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join(result.file_name());

        result.save_json(&path).unwrap();
        let loaded = QuizResult::load_json(&path).unwrap();
        assert_eq!(loaded, result);
    }

    #[test]
    fn load_rejects_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"name":"x","score":0,"total":0,"date":"yesterday","answers":[]}"#,
        )
        .unwrap();
        assert!(QuizResult::load_json(&path).is_err());
    }

    #[test]
    fn save_names_the_directory_it_could_not_create() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = make_result("Ada")
            .save_json(&blocker.join("quiz-results-Ada.json"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to create directory"));
        assert!(err.to_string().contains("out"));
    }
}
