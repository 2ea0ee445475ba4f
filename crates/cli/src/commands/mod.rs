//! CLI command definitions and execution
//!
//! Each command lives in its own module with an `Args` struct and an
//! `execute` function returning an exit code.

use clap::{Args, Parser, Subcommand};
use webotron_core::{ConfigManager, Session};
use webotron_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod list_bucket_objects;
mod list_buckets;
mod setup_bucket;
mod sync;

/// webotron - deploy static websites to S3
///
/// Creates and configures website buckets and uploads local sites into them.
#[derive(Parser, Debug)]
#[command(name = "webotron")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection flags, layered over the `[session]` config section
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Credential profile from the shared AWS config files
    #[arg(long, global = true, env = "WEBOTRON_PROFILE")]
    pub profile: Option<String>,

    /// Region for new buckets and API calls
    #[arg(long, global = true, env = "WEBOTRON_REGION")]
    pub region: Option<String>,

    /// Custom S3-compatible endpoint URL
    #[arg(long, global = true, env = "WEBOTRON_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Use path-style bucket addressing (`--path-style=false` overrides the config)
    #[arg(
        long,
        global = true,
        env = "WEBOTRON_PATH_STYLE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub path_style: Option<bool>,
}

impl SessionArgs {
    fn to_session(&self) -> Session {
        Session {
            profile: self.profile.clone(),
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
            path_style: self.path_style,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all buckets
    ListBuckets(list_buckets::ListBucketsArgs),

    /// List all objects in a bucket
    ListBucketObjects(list_bucket_objects::ListBucketObjectsArgs),

    /// Create a bucket and configure it for website hosting
    SetupBucket(setup_bucket::SetupBucketArgs),

    /// Upload the contents of a local directory to a bucket
    Sync(sync::SyncArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let command = match cli.command {
        Commands::Completions(args) => return completions::execute(args),
        command => command,
    };

    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(e) => {
            let formatter = Formatter::new(OutputConfig {
                json: cli.json,
                no_color: cli.no_color,
                ..Default::default()
            });
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from(&e);
        }
    };

    let output_config = OutputConfig {
        json: cli.json || config.defaults.output == "json",
        no_color: cli.no_color || config.defaults.color == "never",
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };
    let session = config.session.clone().merge(cli.session.to_session());
    tracing::debug!(?session, "Resolved session");

    match command {
        Commands::ListBuckets(args) => list_buckets::execute(args, &session, output_config).await,
        Commands::ListBucketObjects(args) => {
            list_bucket_objects::execute(args, &session, output_config).await
        }
        Commands::SetupBucket(args) => {
            setup_bucket::execute(args, &config, &session, output_config).await
        }
        Commands::Sync(args) => sync::execute(args, &session, output_config).await,
        Commands::Completions(_) => ExitCode::Success,
    }
}

/// Build a client for the resolved session
///
/// Failures are reported through `formatter` and returned as the exit code
/// the command should end with.
pub(crate) async fn connect(
    session: &Session,
    formatter: &Formatter,
) -> Result<S3Client, ExitCode> {
    S3Client::new(session).await.map_err(|e| {
        formatter.error(&format!("Failed to create S3 client: {e}"));
        ExitCode::from(&e)
    })
}
