use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tweet-gate")]
#[command(about = "Authenticated gateway that normalizes tweet-detail lookups")]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Bind host override
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port override
    #[arg(long)]
    pub port: Option<u16>,
}
