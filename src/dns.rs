use std::net::SocketAddr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use hickory_proto::xfer::Protocol;
use hickory_proto::ProtoErrorKind;
use hickory_resolver::config::{NameServerConfig, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveError, ResolveErrorKind, Resolver, TokioResolver};
use tracing::debug;

use crate::error::Result;
use crate::transport::{FailureReason, QueryOutcome, RecordType};

/// Issues a single DNS query against a single provider.
///
/// Expected DNS failures come back as `QueryOutcome::Failure`; anything else
/// is an `Err` and is not part of the benchmark.
#[async_trait]
pub trait QueryClient: Send + Sync {
	async fn resolve(
		&self,
		domain: &str,
		provider: SocketAddr,
		record_type: RecordType,
	) -> Result<QueryOutcome>;
}

/// Production client backed by hickory-resolver over UDP
#[derive(Debug, Clone)]
pub struct HickoryClient {
	timeout: Duration,
}

impl HickoryClient {
	pub fn new(timeout: Duration) -> Self {
		HickoryClient { timeout }
	}

	/// Build a resolver that only knows about `provider`, ignoring system config.
	fn build_resolver(&self, provider: SocketAddr) -> TokioResolver {
		let ns = NameServerConfig::new(provider, Protocol::Udp);
		let config = ResolverConfig::from_parts(None, vec![], vec![ns]);

		// The outer tokio timeout in `resolve` is the bound that counts
		let mut opts = ResolverOpts::default();
		opts.timeout = self.timeout * 2;
		opts.attempts = 1;

		Resolver::builder_with_config(config, TokioConnectionProvider::default())
			.with_options(opts)
			.build()
	}
}

#[async_trait]
impl QueryClient for HickoryClient {
	async fn resolve(
		&self,
		domain: &str,
		provider: SocketAddr,
		record_type: RecordType,
	) -> Result<QueryOutcome> {
		let resolver = self.build_resolver(provider);

		let start = Instant::now();
		let result = tokio::time::timeout(
			self.timeout,
			resolver.lookup(domain, record_type.into()),
		).await;
		let elapsed = start.elapsed();

		match result {
			Ok(Ok(_lookup)) => Ok(QueryOutcome::Success(elapsed)),
			Ok(Err(e)) => match classify_error(&e) {
				Some(reason) => {
					debug!(%provider, domain, %reason, "query failed");
					Ok(QueryOutcome::Failure(reason))
				}
				None => Err(e.into()),
			},
			Err(_) => {
				debug!(%provider, domain, "query timed out");
				Ok(QueryOutcome::Failure(FailureReason::Timeout))
			}
		}
	}
}

/// Map a resolver error onto one of the benchmarked failure reasons.
///
/// Only NXDOMAIN, an empty NOERROR answer and timeouts qualify. Error rcodes
/// such as SERVFAIL or REFUSED return None and are treated as provider faults.
pub fn classify_error(err: &ResolveError) -> Option<FailureReason> {
	let ResolveErrorKind::Proto(proto) = err.kind() else {
		return None;
	};
	match proto.kind() {
		ProtoErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
			ResponseCode::NXDomain => Some(FailureReason::NxDomain),
			ResponseCode::NoError => Some(FailureReason::NoAnswer),
			_ => None,
		},
		ProtoErrorKind::Timeout => Some(FailureReason::Timeout),
		_ => None,
	}
}
