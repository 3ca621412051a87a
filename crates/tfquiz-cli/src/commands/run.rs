//! The `tfquiz run` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use tfquiz_core::loader::{LoadOptions, QuestionSet};
use tfquiz_core::result::QuizResult;
use tfquiz_core::session::QuizSession;
use tfquiz_core::traits::ResultSink;
use tfquiz_io::config::load_config_from;
use tfquiz_io::{source_from_location, FileSink};
use tfquiz_report::html::write_html_report;

use crate::console::Console;
use crate::render::answer_table;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    questions: Option<String>,
    name: Option<String>,
    output: Option<PathBuf>,
    format: Option<String>,
    submit: bool,
    no_save: bool,
    coerce_missing_answer: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let location = questions.unwrap_or_else(|| config.questions.clone());
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let formats: Vec<String> = match format.as_deref() {
        Some("all") => vec!["json".into(), "html".into()],
        Some(f) => f.split(',').map(|s| s.trim().to_string()).collect(),
        None => config.formats.clone(),
    };
    let options = LoadOptions {
        coerce_missing_answer: coerce_missing_answer || config.coerce_missing_answer,
    };
    tracing::debug!(?formats, output = %output.display(), submit, "run options");

    // Resolve the webhook before the quiz so a missing URL fails early
    let webhook = if submit {
        let sink = config.webhook_sink()?.ok_or_else(|| {
            anyhow::anyhow!(
                "--submit needs a [webhook] url in tfquiz.toml or TFQUIZ_WEBHOOK_URL"
            )
        })?;
        Some(sink)
    } else {
        None
    };

    let source = source_from_location(&location)?;
    let questions = QuestionSet::load(source.as_ref(), options)
        .await
        .with_context(|| format!("could not load questions from {location}"))?;
    let questions = Arc::new(questions);

    // Delivered in order: the local file before the webhook
    let mut sinks: Vec<Box<dyn ResultSink>> = Vec::new();
    if !no_save && formats.iter().any(|f| f == "json") {
        sinks.push(Box::new(FileSink::new(&output)));
    }
    if let Some(webhook) = webhook {
        sinks.push(Box::new(webhook));
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let mut session = QuizSession::new(questions);
    let mut preset = name;

    loop {
        console.start(&mut session, preset.take().as_deref())?;
        let result = console.play(&mut session)?;

        console.say(&format!("\n{}", result.summary_line()))?;
        console.say(&answer_table(&result).to_string())?;

        // Local files go first so a failing webhook cannot lose them
        if !no_save && formats.iter().any(|f| f == "html") {
            let path = html_path(&output, &result);
            write_html_report(&result, &path)?;
            eprintln!("HTML report: {}", path.display());
        }

        for sink in &sinks {
            let receipt = sink
                .deliver(&result)
                .await
                .with_context(|| format!("failed to deliver result via {}", sink.name()))?;
            eprintln!("Result delivered ({}): {receipt}", sink.name());
        }

        for fmt in formats.iter().filter(|f| *f != "json" && *f != "html") {
            eprintln!("Unknown format: {fmt}");
        }

        if !console.confirm("\nPlay again? [y/N] ")? {
            break;
        }
        session = session.restart();
    }

    Ok(())
}

fn html_path(output: &Path, result: &QuizResult) -> PathBuf {
    let file_name = result.file_name();
    let stem = file_name.trim_end_matches(".json");
    output.join(format!("{stem}.html"))
}
