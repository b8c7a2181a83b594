use std::path::PathBuf;

use tracing::debug;

/// Loads `.env` from the working directory or its ancestors, if present.
///
/// Variables already set in the process environment take precedence over
/// those in the file.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "Loaded environment file");
            Some(path)
        }
        Err(error) if error.not_found() => None,
        Err(error) => {
            tracing::warn!(%error, "Failed to parse environment file");
            None
        }
    }
}
