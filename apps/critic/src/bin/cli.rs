//! Command-line resume critic. Prints one compact JSON record on stdout.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser};
use serde_json::json;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_critic::config::Config;
use resume_critic::extraction::{decode_text, TesseractOcr, TextExtractor};
use resume_critic::model::ModelProvider;

#[derive(Parser, Debug)]
#[command(name = "resume-critic", version, about = "Resume critic against a job description")]
struct Cli {
    /// Path to resume file (pdf, docx, txt, png, jpg, jpeg, bmp, tiff)
    #[arg(long)]
    resume: PathBuf,

    #[command(flatten)]
    job: JobSource,

    /// Use the configured model backend, falling back to rules on failure
    #[arg(long)]
    use_model: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct JobSource {
    /// Path to job description text file
    #[arg(long)]
    job_file: Option<PathBuf>,

    /// Job description text
    #[arg(long)]
    job_text: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // stdout carries only the JSON record
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_critic={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut models = ModelProvider::from_config(&config);
    let extractor = TextExtractor::new(TesseractOcr::new(config.tesseract_cmd.clone()));

    let output = run(&cli, &extractor, &models).await;
    println!("{output}");

    models.teardown();
    Ok(())
}

/// Produces the line to print: either the suggestion record or an error payload.
async fn run(cli: &Cli, extractor: &TextExtractor, models: &ModelProvider) -> String {
    if !cli.resume.exists() {
        return error_payload("Resume file not found");
    }

    let resume_text = extractor.extract_file(&cli.resume);
    if resume_text.trim().is_empty() {
        warn!(
            "No text extracted from {}; analyzing empty text",
            cli.resume.display()
        );
    }

    let job_description = match (&cli.job.job_file, &cli.job.job_text) {
        (Some(path), _) => {
            if !path.exists() {
                return error_payload("Job description file not found");
            }
            match std::fs::read(path) {
                Ok(bytes) => decode_text(&bytes),
                Err(e) => {
                    warn!("Failed to read {}: {e}", path.display());
                    String::new()
                }
            }
        }
        (None, Some(text)) => text.clone(),
        (None, None) => String::new(),
    };

    debug!(
        "Resume {} chars, job description {} chars",
        resume_text.len(),
        job_description.len()
    );

    models
        .suggest(&resume_text, &job_description, cli.use_model)
        .await
        .to_json()
}

fn error_payload(message: &str) -> String {
    json!({ "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_critic::suggestions::generate_json;
    use std::io::Write;

    const RESUME: &str = "Experienced Python developer, 5 years experience, built internal tools";
    const JD: &str = "Looking for Python, AWS, Docker, Kubernetes engineer with CI/CD experience";

    fn txt_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["resume-critic"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_job_source_is_required() {
        assert!(Cli::try_parse_from(["resume-critic", "--resume", "cv.pdf"]).is_err());
    }

    #[test]
    fn test_job_sources_are_exclusive() {
        let result = Cli::try_parse_from([
            "resume-critic",
            "--resume",
            "cv.pdf",
            "--job-file",
            "jd.txt",
            "--job-text",
            "Rust engineer",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_use_model_defaults_off() {
        let cli = parse(&["--resume", "cv.pdf", "--job-text", "Rust engineer"]);
        assert!(!cli.use_model);
        assert_eq!(cli.job.job_text.as_deref(), Some("Rust engineer"));
    }

    #[tokio::test]
    async fn test_missing_resume_prints_error_payload() {
        let cli = parse(&["--resume", "/nonexistent/cv.pdf", "--job-text", JD]);
        let output = run(&cli, &TextExtractor::default(), &ModelProvider::disabled()).await;
        assert_eq!(output, r#"{"error":"Resume file not found"}"#);
    }

    #[tokio::test]
    async fn test_missing_job_file_prints_error_payload() {
        let resume = txt_file(RESUME);
        let cli = parse(&[
            "--resume",
            resume.path().to_str().unwrap(),
            "--job-file",
            "/nonexistent/jd.txt",
        ]);
        let output = run(&cli, &TextExtractor::default(), &ModelProvider::disabled()).await;
        assert_eq!(output, r#"{"error":"Job description file not found"}"#);
    }

    #[tokio::test]
    async fn test_job_text_and_job_file_give_same_record() {
        let resume = txt_file(RESUME);
        let jd = txt_file(JD);
        let resume_path = resume.path().to_str().unwrap();

        let from_text = run(
            &parse(&["--resume", resume_path, "--job-text", JD]),
            &TextExtractor::default(),
            &ModelProvider::disabled(),
        )
        .await;
        let from_file = run(
            &parse(&["--resume", resume_path, "--job-file", jd.path().to_str().unwrap()]),
            &TextExtractor::default(),
            &ModelProvider::disabled(),
        )
        .await;

        assert_eq!(from_text, from_file);
        assert_eq!(from_text, generate_json(RESUME, JD));
        assert!(!from_text.contains('\n'));
    }

    #[tokio::test]
    async fn test_use_model_without_backend_falls_back() {
        let resume = txt_file(RESUME);
        let cli = parse(&[
            "--resume",
            resume.path().to_str().unwrap(),
            "--job-text",
            JD,
            "--use-model",
        ]);
        let output = run(&cli, &TextExtractor::default(), &ModelProvider::disabled()).await;
        assert_eq!(output, generate_json(RESUME, JD));
    }
}
