use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "site-verify")]
#[command(about = "Verifies a live site against an expected page tree")]
#[command(version)]
pub struct Args {
    /// Path to the expected-structure file (a JSON array of root pages)
    pub spec: String,

    /// WebDriver server URL
    #[arg(short, long, default_value = "http://localhost:4444")]
    pub webdriver_url: String,

    /// Driver-level page-load timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub page_load_timeout: u64,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
