use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use faro_core::discover::validate;
use faro_core::{
    DEFAULT_PROBE_TERM, Document, Feed, FetchConfig, Fetcher, ProfileStore, SiteAnalyzer, collect_site, locate_search,
    resolve_selectors,
};
use owo_colors::OwoColorize;
use url::Url;

mod echo;

use echo::{print_banner, print_error, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Discover how news sites search and collect their headlines
#[derive(Parser, Debug)]
#[command(name = "faro")]
#[command(author = "Faro Contributors")]
#[command(version = "1.0.0")]
#[command(about = "Discover how news sites search and collect their headlines", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable step-by-step progress output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover search and extraction selectors for one or more sites
    Discover {
        /// Site front-page URLs
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,

        /// Search term used to probe each site
        #[arg(long, default_value = DEFAULT_PROBE_TERM, value_name = "TERM")]
        term: String,

        /// Directory for discovered configuration files
        #[arg(short, long, default_value = "configs", value_name = "DIR")]
        out: PathBuf,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "15", value_name = "SECS")]
        timeout: u64,

        /// Pause between sites in seconds
        #[arg(long, default_value = "2", value_name = "SECS")]
        delay: u64,

        /// Skip the verification pass after discovery
        #[arg(long)]
        no_validate: bool,
    },

    /// Collect headlines using stored configurations
    Collect {
        /// Directory holding configuration files
        #[arg(long, default_value = "configs", value_name = "DIR")]
        configs: PathBuf,

        /// Directory the aggregated feed is written to
        #[arg(short, long, default_value = "configs", value_name = "DIR")]
        out: PathBuf,

        /// Maximum items taken per site
        #[arg(long, default_value = "5", value_name = "NUM")]
        max_items: usize,

        /// Maximum items in the aggregated feed
        #[arg(long, default_value = "15", value_name = "NUM")]
        feed_cap: usize,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "15", value_name = "SECS")]
        timeout: u64,

        /// Pause between sites in seconds
        #[arg(long, default_value = "2", value_name = "SECS")]
        delay: u64,
    },

    /// Re-check stored configurations against the live sites
    Validate {
        /// Directory holding configuration files
        #[arg(long, default_value = "configs", value_name = "DIR")]
        configs: PathBuf,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "15", value_name = "SECS")]
        timeout: u64,

        /// Pause between sites in seconds
        #[arg(long, default_value = "2", value_name = "SECS")]
        delay: u64,
    },

    /// Inspect a saved results page and print the selectors discovery would pick
    Inspect {
        /// Local HTML file of a search-results page
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Site base URL the page came from
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let verbose = args.verbose;

    if verbose {
        print_banner();
    }

    match args.command {
        Command::Discover { urls, term, out, timeout, delay, no_validate } => {
            run_discover(urls, term, out, timeout, delay, no_validate, verbose).await
        }
        Command::Collect { configs, out, max_items, feed_cap, timeout, delay } => {
            run_collect(configs, out, max_items, feed_cap, timeout, delay, verbose).await
        }
        Command::Validate { configs, timeout, delay } => run_validate(configs, timeout, delay, verbose).await,
        Command::Inspect { file, url } => run_inspect(file, url),
    }
}

async fn run_discover(
    urls: Vec<String>, term: String, out: PathBuf, timeout: u64, delay: u64, no_validate: bool, verbose: bool,
) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(FetchConfig { timeout, ..Default::default() }).context("Failed to build HTTP client")?;
    let mut analyzer = SiteAnalyzer::with_probe_term(fetcher, term);
    if no_validate {
        analyzer = analyzer.without_validation();
    }

    let store = ProfileStore::new(&out);
    let total = urls.len();
    let mut discovered = Vec::new();

    for (index, url) in urls.iter().enumerate() {
        if verbose {
            print_step(index + 1, total, &format!("Analyzing {}", url.bright_white().underline()));
        }

        match analyzer.analyze(url).await {
            Ok(profile) => {
                let path = store.save_profile(&profile).context("Failed to save configuration")?;
                let verdict = if profile.verified { "verified" } else { "unverified" };
                print_success(&format!("{}: {} ({})", profile.name, path.display(), verdict));
                discovered.push(profile);
            }
            Err(e) => print_error(&format!("{}: {}", url, e)),
        }

        if index + 1 < total && delay > 0 {
            tokio::time::sleep(Duration::from_secs(delay)).await;
        }
    }

    if discovered.is_empty() {
        anyhow::bail!("no site could be analyzed");
    }

    let path = store.save_rollup(&discovered).context("Failed to save roll-up")?;
    print_info(&format!("{} configurations saved to {}", discovered.len(), path.display()));

    Ok(())
}

async fn run_collect(
    configs: PathBuf, out: PathBuf, max_items: usize, feed_cap: usize, timeout: u64, delay: u64, verbose: bool,
) -> anyhow::Result<()> {
    let store = ProfileStore::new(&configs);
    let profiles = store.load_profiles().context("Failed to load configurations")?;
    if profiles.is_empty() {
        anyhow::bail!("no configurations found in {}", configs.display());
    }

    let fetcher = Fetcher::new(FetchConfig { timeout, ..Default::default() }).context("Failed to build HTTP client")?;
    let total = profiles.len();
    let mut items = Vec::new();
    let mut failures = 0usize;

    for (index, profile) in profiles.iter().enumerate() {
        if verbose {
            print_step(index + 1, total, &format!("Collecting from {}", profile.name.bright_white()));
        }

        match collect_site(&fetcher, profile, max_items).await {
            Ok(site_items) => {
                print_success(&format!("{}: {} items", profile.name, site_items.len()));
                items.extend(site_items);
            }
            Err(e) => {
                failures += 1;
                print_warning(&format!("{}: {}", profile.name, e));
            }
        }

        if index + 1 < total && delay > 0 {
            tokio::time::sleep(Duration::from_secs(delay)).await;
        }
    }

    if failures == total {
        anyhow::bail!("every site failed");
    }

    let feed = Feed::new(items, total, feed_cap);
    let path = ProfileStore::new(&out).save_feed(&feed).context("Failed to save feed")?;
    print_info(&format!("{} items written to {}", feed.total_items, path.display()));

    Ok(())
}

async fn run_validate(configs: PathBuf, timeout: u64, delay: u64, verbose: bool) -> anyhow::Result<()> {
    let store = ProfileStore::new(&configs);
    let mut profiles = store.load_profiles().context("Failed to load configurations")?;
    if profiles.is_empty() {
        anyhow::bail!("no configurations found in {}", configs.display());
    }

    let fetcher = Fetcher::new(FetchConfig { timeout, ..Default::default() }).context("Failed to build HTTP client")?;
    let total = profiles.len();
    let mut passing = 0usize;

    for (index, profile) in profiles.iter_mut().enumerate() {
        if verbose {
            print_step(index + 1, total, &format!("Validating {}", profile.name.bright_white()));
        }

        let ok = match validate(&fetcher, profile).await {
            Ok(ok) => ok,
            Err(e) => {
                print_warning(&format!("{}: {}", profile.name, e));
                false
            }
        };

        if ok {
            passing += 1;
            print_success(&format!("{}: still extracting", profile.name));
        } else {
            print_error(&format!("{}: selectors no longer match", profile.name));
        }

        if profile.verified != ok {
            profile.verified = ok;
            store.save_profile(profile).context("Failed to update configuration")?;
        }

        if index + 1 < total && delay > 0 {
            tokio::time::sleep(Duration::from_secs(delay)).await;
        }
    }

    print_info(&format!("{}/{} configurations passing", passing, total));

    if passing == 0 {
        anyhow::bail!("every configuration failed validation");
    }

    Ok(())
}

fn run_inspect(file: PathBuf, url: Option<String>) -> anyhow::Result<()> {
    let html = fs::read_to_string(&file).with_context(|| format!("Failed to read file: {}", file.display()))?;

    let base = url.as_deref().map(Url::parse).transpose().context("Invalid base URL")?;

    let doc = match url.as_deref() {
        Some(url) => Document::parse_with_url(&html, url).context("Failed to parse HTML")?,
        None => Document::parse(&html).context("Failed to parse HTML")?,
    };

    if let Some(base) = &base {
        match locate_search(&doc, base).context("Failed to scan for search forms")? {
            Some(locator) => {
                println!("search: {} {} (field {})", locator.method, locator.endpoint, locator.field_name);
            }
            None => println!("search: not found"),
        }
    }

    let selectors = resolve_selectors(&doc)?;
    println!("container: {}", selectors.container);
    for (label, value) in [
        ("titulo", &selectors.title),
        ("resumo", &selectors.summary),
        ("link", &selectors.link),
        ("imagem", &selectors.image),
        ("data", &selectors.date),
    ] {
        match value {
            Some(selector) => println!("{}: {}", label, selector),
            None => println!("{}: -", label),
        }
    }

    Ok(())
}
