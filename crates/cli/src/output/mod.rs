//! Terminal output: the formatter used by every command and the sync spinner

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::ProgressBar;

/// Output flags shared by all commands
///
/// `json` and `no_color` may also be switched on from the `[defaults]`
/// section of the config file.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub no_color: bool,
    /// Hide the sync spinner
    pub no_progress: bool,
    /// Only errors are printed
    pub quiet: bool,
}
