use clap::Parser;
use site_verify::SiteCheck;
use site_verify::config::SessionConfig;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the expected-structure file (JSON)
    #[arg(short, long)]
    spec: String,

    /// Path to a session configuration file (JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the WebDriver URL
    #[arg(short, long)]
    webdriver_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    println!("Loading expected structure from: {}", args.spec);
    let mut check = SiteCheck::from_spec_file(&args.spec)?;

    // Apply configuration from file if specified
    if let Some(config_path) = args.config {
        println!("Loading session configuration from: {}", config_path);
        let config = SessionConfig::from_file(config_path)?;
        println!("  WebDriver URL: {}", config.webdriver_url);
        println!("  Page-load timeout: {}s", config.page_load_timeout_secs);
        check = check.with_config(config);
    }

    // Apply the CLI override last
    if let Some(url) = args.webdriver_url {
        check = check.with_webdriver_url(&url);
    }

    let report = check.run().await?;

    for page in report.walk() {
        let status = if page.has_errors() { "FAIL" } else { "PASS" };
        println!("{} {}", status, page.url);
        for link in &page.unresolved_children {
            println!("     link not found: {}", link);
        }
        for keyword in &page.missing_keywords {
            println!("     keyword not found: {}", keyword);
        }
    }

    println!(
        "Verified {} page(s) with {} problem(s)",
        report.pages_visited(),
        report.error_count()
    );

    Ok(())
}
