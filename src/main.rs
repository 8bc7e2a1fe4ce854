//! Command-line entry point for the sentiment dashboard.

use std::io::{self, BufRead};
use std::path::PathBuf;

use sentiboard::config::{self, Settings};
use sentiboard::dashboard::{
    Dashboard, DashboardEvent, DisplaySurface, JsonSurface, TerminalSurface,
};
use sentiboard::dataset::DatasetSource;
use sentiboard::logging::{self, ConsoleLogging};
use sentiboard::sentiment::Sentiment;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };

    let console = match options.format {
        OutputFormat::Text => ConsoleLogging::Stderr,
        OutputFormat::Json => ConsoleLogging::Off,
    };
    if let Err(err) = logging::init(console) {
        eprintln!("Logging disabled: {err}");
    }

    if options.init_config {
        let path = config::config_path().map_err(|err| err.to_string())?;
        config::save_to_path(&Settings::default(), &path).map_err(|err| err.to_string())?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }

    let mut settings = config::load_or_default().map_err(|err| err.to_string())?;
    if let Some(k) = options.sample_size {
        settings.sample_size = k;
    }
    if let Some(labels) = options.labels.clone() {
        settings.visible_labels = labels;
    }
    let settings = settings.normalized();
    let scorer = config::build_scorer(&settings).map_err(|err| err.to_string())?;

    let source = match options.dataset.clone().or_else(|| settings.default_dataset.clone()) {
        Some(path) => DatasetSource::Path(path),
        None => DatasetSource::Bundled,
    };

    let mut events = vec![DashboardEvent::LoadDataset(source)];
    if let Some(path) = &options.upload {
        let bytes = std::fs::read(path)
            .map_err(|err| format!("Failed to read upload {}: {err}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        events.push(DashboardEvent::UploadFile { name, bytes });
    }
    events.extend(options.sentences.iter().cloned().map(DashboardEvent::SubmitSentence));

    let mut dashboard = Dashboard::new(scorer, settings);
    let stdout = io::stdout();
    let mut surface: Box<dyn DisplaySurface> = match options.format {
        OutputFormat::Text => Box::new(TerminalSurface::new(stdout.lock())),
        OutputFormat::Json => Box::new(JsonSurface::new(stdout.lock())),
    };
    for event in events {
        dashboard
            .handle(event, surface.as_mut())
            .map_err(|err| format!("Failed to write output: {err}"))?;
    }

    if options.interactive {
        for line in io::stdin().lock().lines() {
            let line = line.map_err(|err| format!("Failed to read stdin: {err}"))?;
            dashboard
                .handle(DashboardEvent::SubmitSentence(line), surface.as_mut())
                .map_err(|err| format!("Failed to write output: {err}"))?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default)]
struct Options {
    dataset: Option<PathBuf>,
    upload: Option<PathBuf>,
    sentences: Vec<String>,
    labels: Option<Vec<Sentiment>>,
    sample_size: Option<usize>,
    format: OutputFormat,
    interactive: bool,
    init_config: bool,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--dataset" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--dataset requires a value".to_string())?;
                options.dataset = Some(PathBuf::from(value));
            }
            "--upload" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--upload requires a value".to_string())?;
                options.upload = Some(PathBuf::from(value));
            }
            "--check" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--check requires a value".to_string())?;
                options.sentences.push(value.clone());
            }
            "--labels" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--labels requires a value".to_string())?;
                options.labels = Some(parse_labels(value)?);
            }
            "--samples" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--samples requires a value".to_string())?;
                let k = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --samples value: {value}"))?;
                options.sample_size = Some(k);
            }
            "--format" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--format requires a value".to_string())?;
                options.format = match value.as_str() {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    other => {
                        return Err(format!("Unknown format: {other} (expected text or json)"));
                    }
                };
            }
            "--interactive" => {
                options.interactive = true;
            }
            "--init-config" => {
                options.init_config = true;
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn parse_labels(value: &str) -> Result<Vec<Sentiment>, String> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.parse::<Sentiment>().map_err(|err| err.to_string()))
        .collect()
}

fn help_text() -> String {
    [
        "sentiboard",
        "",
        "Classifies short texts as Positive, Neutral or Negative and summarizes them.",
        "",
        "Usage:",
        "  sentiboard [--dataset <csv>] [--upload <csv>] [--check <sentence>]...",
        "  sentiboard --interactive",
        "  sentiboard --init-config",
        "",
        "Options:",
        "  --dataset <csv>     CSV with a `text` column (defaults to config, then the bundled sample).",
        "  --upload <csv>      Validate and preview an additional CSV.",
        "  --check <sentence>  Classify a single sentence (repeatable).",
        "  --interactive       Classify sentences read from stdin, one per line.",
        "  --labels <list>     Comma-separated labels whose samples are shown.",
        "  --samples <k>       Sample comments per label (default 3).",
        "  --format <fmt>      Output format: text (default) or json.",
        "  --init-config       Write default settings to the config file and exit.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_repeatable_checks_and_format() {
        let options = parse_args(args(&[
            "--check", "good", "--check", "bad", "--format", "json", "--samples", "5",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(options.sentences, vec!["good", "bad"]);
        assert_eq!(options.format, OutputFormat::Json);
        assert_eq!(options.sample_size, Some(5));
    }

    #[test]
    fn parses_label_filter() {
        let options = parse_args(args(&["--labels", "positive,Negative"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            options.labels,
            Some(vec![Sentiment::Positive, Sentiment::Negative])
        );
        assert!(parse_args(args(&["--labels", "happy"])).is_err());
    }

    #[test]
    fn rejects_missing_values_and_unknown_flags() {
        assert!(parse_args(args(&["--dataset"])).is_err());
        assert!(parse_args(args(&["--format", "xml"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse_args(args(&["--help"])).unwrap().is_none());
    }
}
