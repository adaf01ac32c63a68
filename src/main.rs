use clap::Parser;
use site_verify::{RunReport, SiteCheck};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Loading expected structure from {}", args.spec);

    let check = match SiteCheck::from_spec_file(&args.spec) {
        Ok(check) => check,
        Err(e) => {
            ::log::error!("Failed to load spec: {}", e);
            std::process::exit(2);
        }
    };

    println!("Note: verification requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using {}",
        args.webdriver_url
    );

    let start_time = std::time::Instant::now();
    let report = match check
        .with_webdriver_url(&args.webdriver_url)
        .with_page_load_timeout(args.page_load_timeout)
        .run()
        .await
    {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Verification could not complete: {}", e);
            std::process::exit(2);
        }
    };

    ::log::info!(
        "Checked {} pages in {:.2} seconds",
        report.pages_visited(),
        start_time.elapsed().as_secs_f64()
    );

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                ::log::error!("Failed to render report: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        print_report(&report);
    }

    if !report.passed() {
        std::process::exit(1);
    }
}

/// Renders the report as one line per page, with a line per problem
fn print_report(report: &RunReport) {
    for page in report.walk() {
        let heading = match &page.name {
            Some(name) => format!("{} ({})", name, page.url),
            None => page.url.clone(),
        };
        if page.has_errors() {
            println!("FAIL {}", heading);
            for link in &page.unresolved_children {
                println!("     link not found: {}", link);
            }
            for keyword in &page.missing_keywords {
                println!("     keyword not found: {}", keyword);
            }
        } else {
            println!("PASS {}", heading);
        }
    }
    println!(
        "{}: {} page(s) checked, {} problem(s)",
        if report.passed() { "PASSED" } else { "FAILED" },
        report.pages_visited(),
        report.error_count()
    );
}
