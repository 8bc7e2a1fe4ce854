use std::io::{self, Write};

use serde::Serialize;

use super::{DatasetView, DisplaySurface, SentenceVerdict, UploadOutcome};

/// Writes one JSON document per line for each result.
pub struct JsonSurface<W> {
    out: W,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Envelope<'a> {
    Dataset { view: &'a DatasetView },
    Verdict { verdict: &'a SentenceVerdict },
    Upload { outcome: &'a UploadOutcome },
    Error { message: &'a str },
}

impl<W: Write> JsonSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, envelope: Envelope<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &envelope).map_err(io::Error::other)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> DisplaySurface for JsonSurface<W> {
    fn show_dataset(&mut self, view: &DatasetView) -> io::Result<()> {
        self.emit(Envelope::Dataset { view })
    }

    fn show_verdict(&mut self, verdict: &SentenceVerdict) -> io::Result<()> {
        self.emit(Envelope::Verdict { verdict })
    }

    fn show_upload(&mut self, outcome: &UploadOutcome) -> io::Result<()> {
        self.emit(Envelope::Upload { outcome })
    }

    fn show_error(&mut self, message: &str) -> io::Result<()> {
        self.emit(Envelope::Error { message })
    }
}
