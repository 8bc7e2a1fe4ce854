use std::io;

use super::{DatasetView, SentenceVerdict, UploadOutcome};

/// Rendering target for dashboard results.
pub trait DisplaySurface {
    fn show_dataset(&mut self, view: &DatasetView) -> io::Result<()>;
    fn show_verdict(&mut self, verdict: &SentenceVerdict) -> io::Result<()>;
    fn show_upload(&mut self, outcome: &UploadOutcome) -> io::Result<()>;
    fn show_error(&mut self, message: &str) -> io::Result<()>;
}
