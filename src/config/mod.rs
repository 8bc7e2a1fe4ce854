//! Dashboard settings stored as TOML under the app directory.

use crate::app_dirs;
use crate::sentiment::lexicon::LEXICON_FILE_NAME;
use crate::sentiment::{Lexicon, LexiconScorer};

mod defaults;
mod errors;
mod load;
mod save;
mod types;


/// Default filename used to store the dashboard configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub use errors::ConfigError;
pub use load::{config_path, load_from, load_or_default};
pub use save::{save, save_to_path};
pub use types::Settings;

/// Build the lexicon scorer described by `settings`.
///
/// An explicit `lexicon_path` must exist. Otherwise a `lexicon.toml` in the
/// app directory is picked up when present, and the built-in tables are used
/// when it is not.
pub fn build_scorer(settings: &Settings) -> Result<LexiconScorer, ConfigError> {
    let lexicon = match &settings.lexicon_path {
        Some(path) => Lexicon::with_overrides_from(path)?,
        None => {
            let candidate = app_dirs::app_root_dir()
                .map_err(map_app_dir_error)?
                .join(LEXICON_FILE_NAME);
            if candidate.is_file() {
                Lexicon::with_overrides_from(&candidate)?
            } else {
                Lexicon::builtin()
            }
        }
    };
    Ok(LexiconScorer::new(lexicon).with_max_chars(settings.max_text_chars))
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
