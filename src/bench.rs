use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::dns::QueryClient;
use crate::stats::{summarize, DomainStats, ProviderResult};
use crate::transport::{BenchmarkConfig, Provider, QueryOutcome};

/// Benchmark a single provider across every domain.
///
/// Queries run strictly one after another so the runner never competes with
/// itself for the provider. A resolver fault stops this provider only: the
/// faulted domain and everything after it are reported as unresolved.
pub async fn benchmark_provider<C: QueryClient + ?Sized>(
	client: &C,
	addr: SocketAddr,
	domains: &[String],
	config: &BenchmarkConfig,
) -> ProviderResult {
	let mut stats = Vec::with_capacity(domains.len());
	let mut pooled = Vec::new();
	let mut fault = None;

	for domain in domains {
		if fault.is_some() {
			stats.push(DomainStats { domain: domain.clone(), latency: None });
			continue;
		}

		let mut successes = Vec::with_capacity(config.num_queries);
		for _ in 0..config.num_queries {
			match client.resolve(domain, addr, config.record_type).await {
				Ok(QueryOutcome::Success(elapsed)) => successes.push(elapsed.as_secs_f64()),
				Ok(QueryOutcome::Failure(_)) => {}
				Err(e) => {
					warn!(provider = %addr, domain = domain.as_str(), error = %e, "provider fault, skipping remaining queries");
					fault = Some(e.to_string());
					break;
				}
			}
		}

		if fault.is_some() {
			stats.push(DomainStats { domain: domain.clone(), latency: None });
			continue;
		}

		stats.push(DomainStats {
			domain: domain.clone(),
			latency: summarize(&successes),
		});
		pooled.extend(successes);
	}

	ProviderResult { addr, domains: stats, pooled, fault }
}

/// Run the benchmark for every provider concurrently.
///
/// Each distinct address is benchmarked once, in its own task. Results come
/// back in completion order; callers match them to providers by address.
pub async fn run_benchmark(
	client: Arc<dyn QueryClient>,
	providers: &[Provider],
	domains: &[String],
	config: &BenchmarkConfig,
) -> Result<Vec<ProviderResult>> {
	let mut addrs: Vec<SocketAddr> = Vec::new();
	for p in providers {
		if !addrs.contains(&p.addr) {
			addrs.push(p.addr);
		}
	}

	let domains: Arc<[String]> = domains.into();
	let mut set = JoinSet::new();
	for addr in addrs {
		let client = client.clone();
		let domains = domains.clone();
		let config = config.clone();
		set.spawn(async move {
			info!(provider = %addr, "benchmarking provider");
			let result = benchmark_provider(client.as_ref(), addr, &domains, &config).await;
			info!(provider = %addr, successes = result.pooled.len(), "provider finished");
			result
		});
	}

	let mut results = Vec::with_capacity(set.len());
	while let Some(joined) = set.join_next().await {
		let result = joined.map_err(|e| anyhow!("provider task failed: {}", e))?;
		results.push(result);
	}
	Ok(results)
}
