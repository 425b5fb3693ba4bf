//! Command-line front end
//!
//! Parses the positional job arguments, builds the [`Config`] (file, then flag
//! overrides), runs the job and prints one labelled block per step to stdout.
//! Diagnostics go to stderr through `tracing`.

use crate::config::Config;
use crate::error::{Error, Result, ToExitCode};
use crate::job::{JobParams, JobReport, run_job};
use crate::submit::{PresetLocation, Submitter, Unconfigured};
use crate::types::{AccessToken, Location, PrintRequest};
use crate::SvfClient;
use clap::{ArgAction, Parser};
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Download an SVF Cloud print artifact and report the job's status
#[derive(Debug, Parser)]
#[command(name = "svf-print", version, about)]
pub struct Cli {
    /// Bearer access token
    pub access_token: String,

    /// Printer id, e.g. "PDF" or "Excel"
    pub printer_id: String,

    /// Form template path, e.g. form/Test/sample_ja.xml
    pub form_file_path: PathBuf,

    /// Data file path
    pub data_file_path: PathBuf,

    /// Resource file path (empty for none)
    pub resource_file_path: String,

    /// Where to write the downloaded artifact
    pub download_file_path: PathBuf,

    /// Result location of an already submitted job
    #[arg(long, env = "SVF_LOCATION", value_name = "URL")]
    pub location: Option<String>,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API endpoint
    #[arg(long, env = "SVF_API_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum number of 303 redirects followed by a download
    #[arg(long, value_name = "N")]
    pub max_redirects: Option<u32>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Configuration file (if any) with command-line overrides applied
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(endpoint) = &self.endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout {
            config.http.timeout = Duration::from_secs(secs);
        }
        if let Some(max) = self.max_redirects {
            config.http.max_redirects = max;
        }
        config.validate()?;
        Ok(config)
    }

    /// The print job described by the positional arguments
    pub fn print_request(&self) -> PrintRequest {
        PrintRequest {
            printer_id: self.printer_id.clone(),
            form_file_path: self.form_file_path.clone(),
            data_file_path: self.data_file_path.clone(),
            resource_file_path: Some(self.resource_file_path.as_str())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    fn submitter(&self) -> Box<dyn Submitter> {
        match &self.location {
            Some(location) => Box::new(PresetLocation(Location::new(location.as_str()))),
            None => Box::new(Unconfigured),
        }
    }
}

/// Parse the command line, run the job and return the process exit code
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    ExitCode::from(execute(&cli).await)
}

/// Run the job described by `cli`, printing results to stdout
///
/// Returns 0 when every step succeeded, otherwise the exit code of the first failure.
pub async fn execute(cli: &Cli) -> u8 {
    let client = match cli.load_config().and_then(SvfClient::new) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("svf-print: {}", e);
            return e.exit_code();
        }
    };

    let token = AccessToken::new(cli.access_token.as_str());
    let request = cli.print_request();
    let submitter = cli.submitter();

    let params = JobParams {
        token: &token,
        request: &request,
        download_path: &cli.download_file_path,
    };
    match run_job(&client, submitter.as_ref(), &client, params).await {
        Ok(report) => {
            print!("{}", render(&report));
            report.first_error().map_or(0, |e| e.exit_code())
        }
        Err(e) => {
            println!("print error.");
            eprintln!("svf-print: {}", e);
            e.exit_code()
        }
    }
}

/// Human-readable report, one `label=` line followed by its value per step
pub fn render(report: &JobReport) -> String {
    let download = report
        .download
        .as_ref()
        .map(|outcome| outcome.path.display());
    let mut out = String::new();
    push_block(&mut out, "location", Ok::<_, &Error>(&report.location));
    push_block(&mut out, "downloadFilePath", download);
    push_block(&mut out, "artifactInfo", report.artifact_info.as_ref());
    push_block(&mut out, "printStatus", report.status.as_ref());
    out
}

fn push_block<T: Display>(out: &mut String, label: &str, value: std::result::Result<T, &Error>) {
    out.push_str(label);
    out.push_str("=\n");
    match value {
        Ok(value) => out.push_str(&value.to_string()),
        Err(e) => out.push_str(&e.status_line().unwrap_or_else(|| e.to_string())),
    }
    out.push('\n');
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("svf_print={}", level)));
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
