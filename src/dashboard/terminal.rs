use std::io::{self, Write};

use super::{DatasetView, DisplaySurface, SentenceVerdict, UploadOutcome};
use crate::sentiment::Sentiment;

/// Width of the longest distribution bar, in characters.
const BAR_WIDTH: usize = 30;
/// Word-cloud terms listed per label.
const CLOUD_TERMS_SHOWN: usize = 8;

/// Plain-text renderer for terminals and log-friendly output.
pub struct TerminalSurface<W> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_distribution(&mut self, view: &DatasetView) -> io::Result<()> {
        let summary = &view.summary;
        let peak = summary.counts.iter().map(|(_, n)| n).max().unwrap_or(0);
        writeln!(self.out, "Sentiment Distribution")?;
        for label in &summary.labels {
            let bar = if peak == 0 {
                0
            } else {
                (label.count * BAR_WIDTH).div_ceil(peak)
            };
            writeln!(
                self.out,
                "  {:<9} {:>6} {:>6.1}%  {}",
                label.label.as_str(),
                label.count,
                label.share,
                "#".repeat(bar)
            )?;
        }
        writeln!(self.out, "  {:<9} {:>6}", "Total", summary.total)
    }

    fn write_samples(&mut self, view: &DatasetView) -> io::Result<()> {
        writeln!(self.out, "Sample Comments by Sentiment")?;
        for label in view.summary.labels.iter().filter(|label| label.visible) {
            writeln!(self.out, "### {}", label.label)?;
            if label.samples.is_empty() {
                writeln!(self.out, "  (none)")?;
            }
            for text in &label.samples {
                writeln!(self.out, "  \u{2022} {text}")?;
            }
        }
        Ok(())
    }

    fn write_word_clouds(&mut self, view: &DatasetView) -> io::Result<()> {
        writeln!(self.out, "Word Clouds by Sentiment")?;
        for label in view.summary.labels.iter().filter(|label| label.count > 0) {
            let terms: Vec<String> = label
                .word_cloud
                .iter()
                .take(CLOUD_TERMS_SHOWN)
                .map(|term| format!("{}({})", term.word, term.count))
                .collect();
            writeln!(self.out, "  {:<9} {}", label.label.as_str(), terms.join(" "))?;
        }
        Ok(())
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn show_dataset(&mut self, view: &DatasetView) -> io::Result<()> {
        writeln!(
            self.out,
            "Dataset: {}{}",
            view.source,
            if view.cached { " [cached]" } else { "" }
        )?;
        self.write_distribution(view)?;
        writeln!(self.out)?;
        self.write_samples(view)?;
        writeln!(self.out)?;
        self.write_word_clouds(view)?;
        self.out.flush()
    }

    fn show_verdict(&mut self, verdict: &SentenceVerdict) -> io::Result<()> {
        writeln!(
            self.out,
            "Sentiment: :{}: `{}` (polarity {:+.2})",
            verdict.indicator, verdict.label, verdict.polarity
        )?;
        self.out.flush()
    }

    fn show_upload(&mut self, outcome: &UploadOutcome) -> io::Result<()> {
        match outcome {
            UploadOutcome::Processed {
                name,
                rows,
                counts,
                preview,
                ..
            } => {
                writeln!(self.out, "File processed successfully: {name} ({rows} rows)")?;
                let tally: Vec<String> = Sentiment::ALL
                    .into_iter()
                    .map(|label| format!("{label} {}", counts.get(label)))
                    .collect();
                writeln!(self.out, "  {}", tally.join(", "))?;
                writeln!(self.out, "Uploaded Data Sentiment Preview")?;
                for row in preview {
                    writeln!(self.out, "  [{:<8}] {}", row.sentiment.as_str(), row.text)?;
                }
            }
            UploadOutcome::Rejected { name, message } => {
                writeln!(self.out, "Upload rejected ({name}): {message}")?;
            }
        }
        self.out.flush()
    }

    fn show_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "Error: {message}")?;
        self.out.flush()
    }
}
