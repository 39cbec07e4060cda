use clap::Parser;

/// Nagios-style probe for the status endpoint of a Monit daemon.
#[derive(Debug, Clone, Parser)]
#[command(name = "check_monit")]
#[command(about = "Checks the health of services reported by a Monit daemon")]
pub struct Config {
    /// Monit host to query
    #[arg(short = 'H', long)]
    pub hostname: String,

    /// Monit HTTP port
    #[arg(short = 'P', long)]
    pub port: u16,

    /// Username for basic authentication
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Password for basic authentication
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Restrict the check to one service name
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// Restrict the check to services in one group
    #[arg(short = 'g', long)]
    pub group: Option<String>,
}

impl Config {
    pub fn status_url(&self) -> String {
        format!("http://{}:{}/_status?format=xml", self.hostname, self.port)
    }
}
