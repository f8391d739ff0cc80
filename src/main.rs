use clap::Parser;
use listing_aggregator::export::export_listings;
use listing_aggregator::{
    AdapterRegistry, ListingRecord, Orchestrator, PipelineEvent, PipelineState, ScraperConfig,
    Source, SourceRequest,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "listing_aggregator",
    about = "Scrape property listings from Jiji, Realethio, EthiopiaRealty and LivingEthio"
)]
struct Cli {
    /// Pages to scrape per source, e.g. `-p jiji=2 -p "living ethio=1"`
    #[arg(short, long = "pages", value_name = "SOURCE=PAGES")]
    pages: Vec<String>,

    /// Save results to a .csv, .xlsx or .json file (a directory gets a timestamped .xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the known source ids and exit
    #[arg(long)]
    list_sources: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_sources {
        for source in Source::ALL {
            println!("{:<16}{}", source.id(), source.name());
        }
        return ExitCode::SUCCESS;
    }

    // 1️⃣ Validate input before anything touches the network
    let request = match SourceRequest::from_pairs(&cli.pages) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("❌ Input error: {e}");
            return ExitCode::from(2);
        }
    };

    let config = match ScraperConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Configuration error: {e}");
            return ExitCode::from(2);
        }
    };

    // 2️⃣ Build the adapters once and hand them to the orchestrator
    let registry = match AdapterRegistry::from_config(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("❌ Scraper init failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    let orchestrator = Orchestrator::new(registry);

    // 3️⃣ Scrape in the background, report as events arrive
    let run = match orchestrator.run(request) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut rows = Vec::new();
    let state = run.wait(|event| match event {
        PipelineEvent::Finished { rows: merged } => rows = merged,
        other => eprintln!("{other}"),
    });

    if state == PipelineState::Failed {
        eprintln!("❌ Scrape failed");
        return ExitCode::FAILURE;
    }

    if rows.is_empty() {
        println!("No properties found");
        return ExitCode::SUCCESS;
    }

    print_table(&rows);
    println!("Found {} properties", rows.len());

    // 4️⃣ Export if asked
    if let Some(output) = cli.output {
        let path = if output.is_dir() {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            output.join(format!("listings_{stamp}.xlsx"))
        } else {
            output
        };

        match export_listings(&rows, &path) {
            Ok(_) => println!("Data saved to: {}", path.display()),
            Err(e) => {
                eprintln!("❌ Export failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_table(rows: &[ListingRecord]) {
    println!(
        "{:<42} {:<18} {:<24} {:>10} {:<15}",
        "Title", "Price", "Location", "Size (sqm)", "Source"
    );
    for row in rows {
        println!(
            "{:<42} {:<18} {:<24} {:>10.1} {:<15}",
            truncate(&row.title, 42),
            truncate(&row.price, 18),
            truncate(&row.location, 24),
            row.size_sqm,
            row.source.name()
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
