//! The `tfquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("tfquiz.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("questions.json"), SAMPLE_QUESTIONS)?;

    println!("\nNext steps:");
    println!("  1. Edit questions.json with your own statements");
    println!("  2. Run: tfquiz validate --questions questions.json");
    println!("  3. Run: tfquiz run");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# tfquiz configuration

questions = "questions.json"
output_dir = "./quiz-results"
formats = ["json"]

# Reject questions without an answer (set to true to treat them as false)
coerce_missing_answer = false

# Uncomment to allow `tfquiz run --submit`
# [webhook]
# url = "${TFQUIZ_WEBHOOK_URL}"
"#;

const SAMPLE_QUESTIONS: &str = r#"[
  {
    "id": 1,
    "text": "The sky appears blue because of Rayleigh scattering.",
    "answer": true,
    "explanation": "Shorter wavelengths scatter more strongly in the atmosphere."
  },
  {
    "id": 2,
    "text": "Fish can fly.",
    "answer": false,
    "explanation": "A few species glide, but none truly fly."
  },
  {
    "id": 3,
    "text": "Water boils at 100 degrees Celsius at sea level.",
    "answer": true,
    "explanation": "At standard atmospheric pressure."
  }
]
"#;
