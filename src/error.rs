use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Faults that fall outside the benchmarked outcomes
#[derive(Debug, Error)]
pub enum Error {
	/// Resolver failure other than NXDOMAIN, no answer or timeout
	#[error("DNS resolver error: {0}")]
	Resolver(#[from] hickory_resolver::ResolveError),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}
