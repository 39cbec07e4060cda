use std::process::ExitCode;

use check_monit::{
    config::Config, logging, monit_client::HttpMonitClient, report::Severity, run_probe,
};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();

    // clap renders its own usage and diagnostic text; any resolution
    // failure, including --help, leaves the probe result unknown.
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(Severity::Unknown.exit_code());
        }
    };

    let client = HttpMonitClient::new(&config);
    match run_probe(&config, &client).await {
        Ok(report) => {
            println!("{}", report.summary_line());
            ExitCode::from(report.severity.exit_code())
        }
        Err(err) => {
            println!("{err}");
            ExitCode::from(Severity::Unknown.exit_code())
        }
    }
}
