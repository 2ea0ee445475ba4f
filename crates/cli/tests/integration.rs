//! Integration tests for webotron
//!
//! These tests require a running S3-compatible server.
//!
//! Run with:
//! ```bash
//! # Start an S3-compatible server, e.g.
//! docker run -d --name minio -p 9000:9000 \
//!     -e MINIO_ROOT_USER=accesskey \
//!     -e MINIO_ROOT_PASSWORD=secretkey \
//!     minio/minio server /data
//!
//! # Run tests
//! TEST_S3_ENDPOINT=http://localhost:9000 \
//! TEST_S3_ACCESS_KEY=accesskey \
//! TEST_S3_SECRET_KEY=secretkey \
//! cargo test --features integration
//! ```

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};
use std::time::Duration;

use tempfile::TempDir;

/// S3 test configuration from environment
struct TestConfig {
    endpoint: String,
    access_key: String,
    secret_key: String,
}

fn get_test_config() -> Option<TestConfig> {
    Some(TestConfig {
        endpoint: std::env::var("TEST_S3_ENDPOINT").ok()?,
        access_key: std::env::var("TEST_S3_ACCESS_KEY").ok()?,
        secret_key: std::env::var("TEST_S3_SECRET_KEY").ok()?,
    })
}

/// Run webotron against the test endpoint with an isolated config directory
fn run_webotron(args: &[&str], config: &TestConfig, config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_webotron"))
        .args(args)
        .env("WEBOTRON_CONFIG_DIR", config_dir)
        .env("WEBOTRON_ENDPOINT", &config.endpoint)
        .env("WEBOTRON_REGION", "us-east-1")
        .env("AWS_ACCESS_KEY_ID", &config.access_key)
        .env("AWS_SECRET_ACCESS_KEY", &config.secret_key)
        .env_remove("WEBOTRON_PROFILE")
        .env_remove("AWS_PROFILE")
        .arg("--path-style")
        .output()
        .expect("Failed to execute webotron")
}

/// Wait for the S3 service to answer list requests
fn wait_for_s3_ready(config: &TestConfig, config_dir: &Path) -> bool {
    for _ in 0..30 {
        if run_webotron(&["list-buckets"], config, config_dir)
            .status
            .success()
        {
            return true;
        }
        std::thread::sleep(Duration::from_secs(1));
    }
    false
}

fn unique_bucket(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("webotron-{prefix}-{}", nanos % 1_000_000_000)
}

/// Test helper: returns the config and config dir, or None to skip
fn setup() -> Option<(TestConfig, TempDir)> {
    let config = get_test_config()?;
    let config_dir = tempfile::tempdir().ok()?;

    if !wait_for_s3_ready(&config, config_dir.path()) {
        eprintln!("S3 service did not become ready in time");
        return None;
    }

    Some((config, config_dir))
}

/// Write a small site into a fresh temp directory
fn write_site() -> TempDir {
    let site = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(site.path().join("index.html"), "<h1>home</h1>").unwrap();
    std::fs::write(site.path().join("error.html"), "<h1>oops</h1>").unwrap();
    std::fs::create_dir_all(site.path().join("css")).unwrap();
    std::fs::write(site.path().join("css/style.css"), "body {}").unwrap();
    std::fs::create_dir_all(site.path().join("img/icons")).unwrap();
    std::fs::write(site.path().join("img/icons/logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
    site
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("Invalid JSON output")
}

mod setup_bucket {
    use super::*;

    #[test]
    fn test_setup_bucket_is_idempotent() {
        let Some((config, config_dir)) = setup() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };
        let bucket = unique_bucket("setup");

        let output = run_webotron(&["setup-bucket", &bucket, "--json"], &config, config_dir.path());
        assert!(
            output.status.success(),
            "setup-bucket failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let json = stdout_json(&output);
        assert_eq!(json["bucket"], bucket.as_str());
        assert_eq!(json["index_document"], "index.html");
        assert_eq!(json["error_document"], "error.html");

        // A bucket the caller already owns is reused
        let output = run_webotron(&["setup-bucket", &bucket], &config, config_dir.path());
        assert!(
            output.status.success(),
            "second setup-bucket failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let output = run_webotron(&["list-buckets"], &config, config_dir.path());
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.lines().any(|line| line == bucket));
    }

    #[test]
    fn test_setup_bucket_custom_error_document() {
        let Some((config, config_dir)) = setup() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };
        let bucket = unique_bucket("errdoc");

        let output = run_webotron(
            &["setup-bucket", &bucket, "--error-document", "404.html", "--json"],
            &config,
            config_dir.path(),
        );
        assert!(output.status.success());
        assert_eq!(stdout_json(&output)["error_document"], "404.html");
    }
}

mod sync {
    use super::*;

    #[test]
    fn test_sync_uploads_every_file() {
        let Some((config, config_dir)) = setup() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };
        let bucket = unique_bucket("sync");
        let site = write_site();

        let output = run_webotron(&["setup-bucket", &bucket], &config, config_dir.path());
        assert!(output.status.success());

        let output = run_webotron(
            &["sync", site.path().to_str().unwrap(), &bucket, "--json"],
            &config,
            config_dir.path(),
        );
        assert!(
            output.status.success(),
            "sync failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let json = stdout_json(&output);
        assert_eq!(json["files"], 4);

        let uploaded = json["uploaded"].as_array().unwrap();
        let content_type = |key: &str| {
            uploaded
                .iter()
                .find(|file| file["key"] == key)
                .and_then(|file| file["content_type"].as_str())
                .map(str::to_string)
        };
        assert_eq!(content_type("index.html").as_deref(), Some("text/html"));
        assert_eq!(content_type("css/style.css").as_deref(), Some("text/css"));
        assert_eq!(content_type("img/icons/logo.png").as_deref(), Some("image/png"));

        let output = run_webotron(
            &["list-bucket-objects", &bucket, "--json"],
            &config,
            config_dir.path(),
        );
        assert!(output.status.success());
        let mut keys: Vec<String> = stdout_json(&output)["objects"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|object| object["key"].as_str().map(str::to_string))
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            ["css/style.css", "error.html", "img/icons/logo.png", "index.html"]
        );
    }

    #[test]
    fn test_sync_twice_overwrites() {
        let Some((config, config_dir)) = setup() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };
        let bucket = unique_bucket("resync");
        let site = write_site();

        assert!(
            run_webotron(&["setup-bucket", &bucket], &config, config_dir.path())
                .status
                .success()
        );
        for _ in 0..2 {
            let output = run_webotron(
                &["sync", site.path().to_str().unwrap(), &bucket],
                &config,
                config_dir.path(),
            );
            assert!(output.status.success());
        }

        let output = run_webotron(&["list-bucket-objects", &bucket], &config, config_dir.path());
        assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 4);
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn test_list_missing_bucket_is_not_found() {
        let Some((config, config_dir)) = setup() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };

        let output = run_webotron(
            &["list-bucket-objects", &unique_bucket("missing")],
            &config,
            config_dir.path(),
        );
        assert!(!output.status.success());
        assert_eq!(output.status.code(), Some(5));
    }

    #[test]
    fn test_sync_to_missing_bucket_fails() {
        let Some((config, config_dir)) = setup() else {
            eprintln!("Skipping: S3 test config not available");
            return;
        };
        let site = write_site();

        let output = run_webotron(
            &["sync", site.path().to_str().unwrap(), &unique_bucket("nobucket")],
            &config,
            config_dir.path(),
        );
        assert_eq!(output.status.code(), Some(5));
    }
}
