//! Rendering of command results
//!
//! Human mode writes plain lines and ✓ step markers to stdout. JSON mode
//! writes one pretty-printed document per command to stdout. Errors always
//! go to stderr, as `{"error": ...}` in JSON mode.

use console::Style;
use serde::Serialize;
use webotron_core::{Bucket, UploadedFile};

use super::OutputConfig;

#[derive(Serialize)]
struct ErrorOutput<'a> {
    error: &'a str,
}

/// Writes command output according to the output flags
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn is_json(&self) -> bool {
        self.config.json
    }

    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// JSON output is never colored
    pub fn colors_enabled(&self) -> bool {
        !(self.config.no_color || self.config.json)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colors_enabled() {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Report a completed step, e.g. one stage of setup-bucket
    pub fn step(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        println!("{} {message}", self.paint(Style::new().green(), "✓"));
    }

    /// Report a failure; printed even in quiet mode
    pub fn error(&self, message: &str) {
        if self.config.json {
            match serde_json::to_string_pretty(&ErrorOutput { error: message }) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{message}"),
            }
            return;
        }
        eprintln!("{} {message}", self.paint(Style::new().red(), "✗"));
    }

    /// Print the command's JSON document
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print one listing line
    pub fn line(&self, text: &str) {
        if !self.config.quiet {
            println!("{text}");
        }
    }

    /// Describe one sync upload as `path -> s3://bucket/key (size)`
    pub fn upload_line(&self, file: &UploadedFile, bucket: &Bucket) -> String {
        let size = file.info.size_human.as_deref().unwrap_or("0 B");
        format!(
            "{} -> {} ({})",
            file.local_path.display(),
            self.paint(Style::new().cyan(), &format!("s3://{bucket}/{}", file.key)),
            self.paint(Style::new().dim(), size)
        )
    }

    /// Bucket name styled for inline use in messages
    pub fn bucket_name(&self, bucket: &str) -> String {
        self.paint(Style::new().bold(), bucket)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use webotron_core::ObjectInfo;

    use super::*;

    fn plain() -> Formatter {
        Formatter::new(OutputConfig {
            no_color: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_default_is_colored_human_output() {
        let formatter = Formatter::default();
        assert!(!formatter.is_json());
        assert!(!formatter.is_quiet());
        assert!(formatter.colors_enabled());
    }

    #[test]
    fn test_json_disables_colors() {
        let formatter = Formatter::new(OutputConfig {
            json: true,
            ..Default::default()
        });
        assert!(formatter.is_json());
        assert!(!formatter.colors_enabled());
    }

    #[test]
    fn test_upload_line() {
        let file = UploadedFile {
            local_path: PathBuf::from("/srv/site/css/style.css"),
            key: "css/style.css".into(),
            info: ObjectInfo::file("css/style.css", 2048),
        };
        assert_eq!(
            plain().upload_line(&file, &Bucket::new("my-site")),
            "/srv/site/css/style.css -> s3://my-site/css/style.css (2 KiB)"
        );
    }

    #[test]
    fn test_bucket_name_plain_without_colors() {
        assert_eq!(plain().bucket_name("my-site"), "my-site");
    }

    #[test]
    fn test_error_document_shape() {
        let json = serde_json::to_string(&ErrorOutput { error: "boom" }).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }
}
