//! Loads Financial Status Report payloads from disk or any reader.
//!
//! The payload is the JSON document submitted with VA Form 5655; its root
//! must be an object. Sections the calculator needs may be missing.
//!
//! ### Minimal example
//!
//! ```json
//! {
//!   "view:enhanced_financial_status_report": true,
//!   "personal_data": {
//!     "employment_history": {
//!       "veteran": {
//!         "employment_records": [
//!           { "gross_monthly_income": 3000, "is_current": true,
//!             "deductions": [{ "name": "Federal tax", "amount": "300" }] }
//!         ]
//!       }
//!     }
//!   }
//! }
//! ```
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use fsr_core::{FormError, FormSnapshot};
use tracing::debug;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a form payload.
#[derive(Debug, thiserror::Error)]
pub enum FormLoadError {
    /// The payload could not be read.
    #[error("cannot read form '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The payload is not a usable form document.
    #[error(transparent)]
    Form(#[from] FormError),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads a form payload from any reader. `origin` only labels errors.
pub fn load_from_reader<R: Read>(
    mut reader: R,
    origin: &Path,
) -> Result<FormSnapshot, FormLoadError> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|source| FormLoadError::Io {
            path: origin.to_path_buf(),
            source,
        })?;

    debug!(origin = %origin.display(), bytes = raw.len(), "read form payload");
    Ok(FormSnapshot::from_json_str(&raw)?)
}

/// Reads a form payload from a file.
pub fn load_from_file(path: &Path) -> Result<FormSnapshot, FormLoadError> {
    let file = File::open(path).map_err(|source| FormLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, path)
}

/// Reads a form payload from `path`, or from stdin when `path` is `None` or
/// `-`.
pub fn load(path: Option<&Path>) -> Result<FormSnapshot, FormLoadError> {
    match path {
        Some(path) if path != Path::new("-") => load_from_file(path),
        _ => load_from_reader(io::stdin().lock(), Path::new("<stdin>")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn origin() -> &'static Path {
        Path::new("inline.json")
    }

    #[test]
    fn load_from_reader_parses_object() {
        let raw = r#"{"income": [{"education": "25"}]}"#;

        let form = load_from_reader(raw.as_bytes(), origin()).unwrap();

        assert_eq!(form.array(&["income"]).len(), 1);
    }

    #[test]
    fn load_from_reader_rejects_invalid_json() {
        let err = load_from_reader("{".as_bytes(), origin()).unwrap_err();

        assert!(matches!(err, FormLoadError::Form(FormError::InvalidJson(_))));
    }

    #[test]
    fn load_from_reader_rejects_non_object() {
        let err = load_from_reader("[]".as_bytes(), origin()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "form payload must be a JSON object, got array"
        );
    }

    #[test]
    fn load_from_file_missing_reports_path() {
        let err = load_from_file(Path::new("does/not/exist.json")).unwrap_err();

        assert!(matches!(err, FormLoadError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
