pub mod form_loader;
pub mod logging;
pub mod report;

pub use form_loader::{FormLoadError, load, load_from_file, load_from_reader};
pub use report::{OutputFormat, render_json, render_text};
