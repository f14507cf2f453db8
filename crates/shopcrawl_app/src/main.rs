//! Command line front end for the storefront crawler.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crawl_logging::LogDestination;
use shopcrawl_core::{
    to_csv, to_json, CsvLayout, ExtractionPolicy, LinkExtractor, PageRange, RecordExtractor,
};
use shopcrawl_engine::{
    ChannelCrawlSink, CrawlEvent, Crawler, ExportWriter, FetchSettings, HttpFetcher, RunHandle,
    Transport, CSV_FILENAME, JSON_FILENAME,
};

/// Crawl a storefront's listing pages and export the products found.
///
/// TEMPLATE is a listing url with a `{page}` placeholder, for example
/// `https://shop.example/collections/all?page={page}`. Press Ctrl+C to
/// stop the run; whatever was collected so far is still exported.
#[derive(Parser, Debug)]
#[command(name = "shopcrawl")]
#[command(version)]
#[command(about = "Storefront catalog crawler", long_about = None)]
struct Cli {
    /// Listing url template containing `{page}`
    #[arg(value_name = "TEMPLATE")]
    template: String,

    /// First listing page (inclusive)
    #[arg(long, default_value_t = 1)]
    start: u32,

    /// Last listing page (inclusive)
    #[arg(long, default_value_t = 1)]
    end: u32,

    /// Which gallery images make it into a record
    #[arg(long, value_enum, default_value_t = PolicyArg::Filtered)]
    policy: PolicyArg,

    /// Substring an image url must contain in filtered mode
    #[arg(long, default_value = "mockup")]
    keyword: String,

    /// Substring that marks an anchor as a product detail link
    #[arg(long, default_value = "/products/")]
    marker: String,

    /// Column layout for the CSV export
    #[arg(long, value_enum, default_value_t = LayoutArg::Joined)]
    csv_layout: LayoutArg,

    /// Relay requests through this gateway, e.g. http://localhost:3000/fetch
    #[arg(long)]
    proxy: Option<String>,

    /// Directory the exports are written to
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// User-Agent header for outgoing requests
    #[arg(long)]
    user_agent: Option<String>,

    /// Also write logs to ./crawl.log
    #[arg(long)]
    log_file: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Keep every gallery image
    Broad,
    /// Keep only print-file assets matching the keyword
    Filtered,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// Two columns; image urls joined into one cell
    Joined,
    /// One column per image, padded to the widest record
    Columns,
}

impl From<LayoutArg> for CsvLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Joined => CsvLayout::Joined,
            LayoutArg::Columns => CsvLayout::ImageColumns,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    crawl_logging::initialize(destination, level_for(cli.verbose));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let range = PageRange::new(cli.template, cli.start, cli.end)?;

    let mut settings = FetchSettings::default();
    if let Some(user_agent) = cli.user_agent {
        settings.user_agent = user_agent;
    }
    let transport = match cli.proxy {
        Some(gateway) => Transport::Proxied { gateway },
        None => Transport::Direct,
    };
    let fetcher = Arc::new(HttpFetcher::with_transport(settings, transport));

    let links = LinkExtractor::with_path_marker(cli.marker);
    let records = match cli.policy {
        PolicyArg::Broad => RecordExtractor::new(ExtractionPolicy::Broad),
        PolicyArg::Filtered => {
            RecordExtractor::with_asset_keyword(ExtractionPolicy::Filtered, cli.keyword)
        }
    };
    let crawler = Crawler::new(fetcher, links, records);

    let handle = RunHandle::new();
    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
    let sink = ChannelCrawlSink::new(event_tx);

    // Ctrl+C asks the run to stop; it unwinds at the next checkpoint.
    {
        let handle = handle.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("Stop requested; finishing the current fetch");
                handle.stop();
            }
        });
    }

    let drain = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                CrawlEvent::Log(line) => {
                    println!("[{}] {}", line.at.format("%H:%M:%S"), line.message);
                }
                CrawlEvent::RecordDiscovered(record) => {
                    log::debug!("record: {} ({} images)", record.name, record.images.len());
                }
            }
        }
    });

    let outcome = crawler.run(&range, &handle, &sink).await;
    // Dropping the sink closes the channel and lets the drain finish.
    drop(sink);
    drain.await?;

    if outcome.stopped {
        log::warn!("Run stopped early; exporting what was collected");
    }

    let writer = ExportWriter::new(cli.out);

    let csv_bytes = to_csv(&outcome.records, cli.csv_layout.into())?;
    let csv_path = writer.save(CSV_FILENAME, &csv_bytes)?;
    log::info!(
        "Wrote {} ({} records)",
        csv_path.display(),
        outcome.records.len(),
    );

    let json_bytes = to_json(&outcome.records)?;
    let json_path = writer.save(JSON_FILENAME, &json_bytes)?;
    log::info!("Wrote {}", json_path.display());

    Ok(())
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn layout_args_map_to_core_layouts() {
        assert_eq!(CsvLayout::from(LayoutArg::Joined), CsvLayout::Joined);
        assert_eq!(CsvLayout::from(LayoutArg::Columns), CsvLayout::ImageColumns);
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), LevelFilter::Info);
        assert_eq!(level_for(1), LevelFilter::Debug);
        assert_eq!(level_for(5), LevelFilter::Trace);
    }
}
