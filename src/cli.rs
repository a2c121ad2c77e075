use std::path::PathBuf;

use clap::Parser;

use crate::transport::RecordType;

/// DNS provider latency benchmark
#[derive(Parser, Debug)]
#[command(name = "dns-latency-bench")]
#[command(about = "Benchmark DNS resolution latency across providers and domains")]
pub struct Cli {
	/// Additional DNS provider addresses (e.g. 9.9.9.10 or 127.0.0.1:5353)
	#[arg(long = "dns", num_args = 1..)]
	pub dns: Vec<String>,

	/// Additional domains to query after the defaults
	#[arg(long = "domains", num_args = 1..)]
	pub domains: Vec<String>,

	/// DNS record type to query
	#[arg(long = "record", value_enum, ignore_case = true, default_value_t = RecordType::A)]
	pub record: RecordType,

	/// CSV file to append results to
	#[arg(long = "csv")]
	pub csv: Option<PathBuf>,

	/// Number of queries per domain
	#[arg(short = 'n', long = "queries", default_value = "10",
		value_parser = clap::value_parser!(u32).range(1..))]
	pub queries: u32,

	/// Per-query timeout in milliseconds
	#[arg(short = 't', long = "timeout", default_value = "5000")]
	pub timeout: u64,

	/// Enable debug logging
	#[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
	pub verbose: bool,

	/// Only log errors
	#[arg(short = 'q', long = "quiet")]
	pub quiet: bool,
}
