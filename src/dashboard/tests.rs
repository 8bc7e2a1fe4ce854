use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::sentiment::LexiconScorer;

/// Scores known sentences from a table; anything else fails.
struct TableScorer(HashMap<&'static str, f64>);

impl PolarityScorer for TableScorer {
    fn score(&self, text: &str) -> Result<f64, ScoreError> {
        self.0.get(text).copied().ok_or(ScoreError::NonFinite)
    }
}

fn demo_dashboard() -> Dashboard<TableScorer> {
    let scorer = TableScorer(HashMap::from([
        ("I love this", 0.5),
        ("I hate this", -0.5),
        ("It is okay", 0.0),
    ]));
    Dashboard::new(scorer, Settings::default())
}

fn demo_source() -> DatasetSource {
    DatasetSource::Bytes {
        name: "demo.csv".into(),
        bytes: b"id,text\n1,I love this\n2,I hate this\n3,It is okay\n".to_vec(),
    }
}

#[test]
fn end_to_end_labels_and_counts() {
    let mut dashboard = demo_dashboard();
    let mut rng = StdRng::seed_from_u64(3);
    let view = dashboard
        .on_dataset_load_with_rng(&demo_source(), &mut rng)
        .unwrap();
    assert!(!view.cached);
    assert_eq!(view.summary.total, 3);
    for label in Sentiment::ALL {
        assert_eq!(view.summary.counts.get(label), 1);
    }
    assert_eq!(
        view.summary.label(Sentiment::Positive).samples,
        vec!["I love this"]
    );
    assert_eq!(
        view.summary.label(Sentiment::Negative).combined_text,
        "I hate this"
    );
}

#[test]
fn second_load_of_same_bytes_hits_cache() {
    let mut dashboard = demo_dashboard();
    let first = dashboard.on_dataset_load(&demo_source()).unwrap();
    let second = dashboard.on_dataset_load(&demo_source()).unwrap();
    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.source, second.source);
    assert_eq!(dashboard.cache().len(), 1);
}

#[test]
fn upload_without_text_column_is_rejected_and_isolated() {
    let mut dashboard = demo_dashboard();
    let before = dashboard.on_dataset_load(&demo_source()).unwrap();

    let outcome = dashboard.on_file_upload("bad.csv", b"comment\nI love this\n");
    match &outcome {
        UploadOutcome::Rejected { name, message } => {
            assert_eq!(name, "bad.csv");
            assert_eq!(message, MISSING_TEXT_COLUMN_MESSAGE);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(dashboard.cache().len(), 1);

    let after = dashboard.on_dataset_load(&demo_source()).unwrap();
    assert!(after.cached);
    assert_eq!(after.summary.counts, before.summary.counts);
}

#[test]
fn upload_preview_is_bounded_and_labeled() {
    let mut dashboard = demo_dashboard();
    dashboard.settings_mut().preview_rows = 2;
    let outcome = dashboard.on_file_upload(
        "mine.csv",
        b"text,extra\nI love this,x\nI hate this,y\nIt is okay,z\n",
    );
    match outcome {
        UploadOutcome::Processed {
            rows,
            counts,
            preview,
            ..
        } => {
            assert_eq!(rows, 3);
            assert_eq!(counts.total(), 3);
            assert_eq!(
                preview,
                vec![
                    PreviewRow {
                        text: "I love this".into(),
                        sentiment: Sentiment::Positive
                    },
                    PreviewRow {
                        text: "I hate this".into(),
                        sentiment: Sentiment::Negative
                    },
                ]
            );
        }
        other => panic!("expected processed upload, got {other:?}"),
    }
}

#[test]
fn upload_scoring_failure_names_the_row() {
    let mut dashboard = demo_dashboard();
    let outcome = dashboard.on_file_upload("odd.csv", b"text\nI love this\nunknown words\n");
    match outcome {
        UploadOutcome::Rejected { message, .. } => assert!(message.contains("row 2")),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(dashboard.cache().is_empty());
}

#[test]
fn sentence_checker_ignores_blank_input() {
    let dashboard = Dashboard::new(LexiconScorer::default(), Settings::default());
    assert_eq!(dashboard.on_sentence_submit("   ").unwrap(), None);

    let verdict = dashboard
        .on_sentence_submit("What a wonderful day")
        .unwrap()
        .unwrap();
    assert_eq!(verdict.label, Sentiment::Positive);
    assert_eq!(verdict.indicator, "smiley");

    let verdict = dashboard.on_sentence_submit("This is awful").unwrap().unwrap();
    assert_eq!(verdict.label, Sentiment::Negative);
    assert_eq!(verdict.indicator, "disappointed");
}

#[test]
fn bundled_dataset_loads_with_lexicon_scorer() {
    let mut dashboard = Dashboard::new(LexiconScorer::default(), Settings::default());
    let view = dashboard.on_dataset_load(&DatasetSource::Bundled).unwrap();
    assert_eq!(view.summary.counts.total(), view.summary.total);
    for label in Sentiment::ALL {
        let summary = view.summary.label(label);
        assert!(summary.samples.len() <= 3);
        assert_eq!(summary.samples.len(), summary.count.min(3));
    }
}

#[test]
fn terminal_surface_renders_every_section() {
    let mut dashboard = demo_dashboard();
    let mut surface = TerminalSurface::new(Vec::new());
    dashboard
        .handle(DashboardEvent::LoadDataset(demo_source()), &mut surface)
        .unwrap();
    dashboard
        .handle(
            DashboardEvent::SubmitSentence("I love this".into()),
            &mut surface,
        )
        .unwrap();
    dashboard
        .handle(
            DashboardEvent::UploadFile {
                name: "bad.csv".into(),
                bytes: b"body\nhi\n".to_vec(),
            },
            &mut surface,
        )
        .unwrap();
    let text = String::from_utf8(surface.into_inner()).unwrap();
    assert!(text.contains("Sentiment Distribution"));
    assert!(text.contains("33.3%"));
    assert!(text.contains("### Neutral"));
    assert!(text.contains("\u{2022} It is okay"));
    assert!(text.contains("Sentiment: :smiley: `Positive`"));
    assert!(text.contains("Upload rejected (bad.csv): CSV must have a column named 'text'."));
}

#[test]
fn json_surface_emits_one_document_per_event() {
    let mut dashboard = demo_dashboard();
    let mut surface = JsonSurface::new(Vec::new());
    dashboard
        .handle(DashboardEvent::LoadDataset(demo_source()), &mut surface)
        .unwrap();
    dashboard
        .handle(DashboardEvent::SubmitSentence("".into()), &mut surface)
        .unwrap();
    dashboard
        .handle(
            DashboardEvent::SubmitSentence("I hate this".into()),
            &mut surface,
        )
        .unwrap();
    let output = String::from_utf8(surface.into_inner()).unwrap();
    let docs: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["kind"], "dataset");
    assert_eq!(docs[0]["view"]["summary"]["counts"]["Neutral"], 1);
    assert_eq!(docs[1]["kind"], "verdict");
    assert_eq!(docs[1]["verdict"]["label"], "Negative");
}

#[test]
fn missing_dataset_file_is_shown_as_error() {
    let mut dashboard = demo_dashboard();
    let mut surface = JsonSurface::new(Vec::new());
    dashboard
        .handle(
            DashboardEvent::LoadDataset(DatasetSource::Path("/no/such/file.csv".into())),
            &mut surface,
        )
        .unwrap();
    let output = String::from_utf8(surface.into_inner()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(doc["kind"], "error");
    assert!(doc["message"].as_str().unwrap().contains("/no/such/file.csv"));
}
