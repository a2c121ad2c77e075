mod bench;
mod cli;
mod dns;
mod domains;
mod error;
mod output;
mod resolver;
mod stats;
mod transport;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::dns::HickoryClient;
use crate::transport::BenchmarkConfig;

/// Set up stderr logging; RUST_LOG overrides the verbosity flags.
fn setup_logging(verbose: bool, quiet: bool) {
	let level = if quiet {
		"error"
	} else if verbose {
		"debug"
	} else {
		"info"
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr).without_time())
		.init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_logging(cli.verbose, cli.quiet);

	let extra_providers = cli.dns.iter()
		.map(|d| resolver::parse_provider(d))
		.collect::<anyhow::Result<Vec<_>>>()?;
	let providers = resolver::merge_providers(&resolver::default_providers(), &extra_providers);
	let domains = domains::merge_domains(&domains::default_domains(), &cli.domains);

	let config = BenchmarkConfig {
		record_type: cli.record,
		num_queries: cli.queries as usize,
		timeout: Duration::from_millis(cli.timeout),
	};

	if !cli.quiet {
		output::print_config_summary(&providers, &domains, &config);
	}

	let client = Arc::new(HickoryClient::new(config.timeout));
	let results = bench::run_benchmark(client, &providers, &domains, &config).await?;

	let detail = stats::detail_rows(&providers, &results);
	let summary = stats::summary_rows(&providers, &results);
	output::print_report(&detail, &summary);
	output::print_faults(&results);

	if let Some(path) = &cli.csv {
		let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
		output::append_csv(path, &detail, config.record_type, &timestamp)?;
		println!("\nResults saved to {}", path.display());
	}

	Ok(())
}
