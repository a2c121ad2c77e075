use std::collections::HashMap;
use std::net::SocketAddr;

use crate::transport::Provider;

/// Latency summary over the successful queries of one domain, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
	pub avg: f64,
	pub min: f64,
	pub max: f64,
}

/// Statistics for one (provider, domain) pair
///
/// `latency` is None when every query for the domain failed.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainStats {
	pub domain: String,
	pub latency: Option<LatencySummary>,
}

/// Everything measured for one provider address
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
	pub addr: SocketAddr,
	/// Per-domain stats in domain iteration order
	pub domains: Vec<DomainStats>,
	/// Every successful latency, domain order then attempt order
	pub pooled: Vec<f64>,
	/// Set when an unexpected resolver fault cut the provider short
	pub fault: Option<String>,
}

impl ProviderResult {
	/// Mean of the pooled latencies, None if nothing resolved.
	pub fn overall_avg(&self) -> Option<f64> {
		mean(&self.pooled)
	}
}

/// One detail row, ready for table or CSV output
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
	pub name: String,
	pub address: String,
	pub domain: String,
	pub latency: Option<LatencySummary>,
}

/// One summary row per configured provider
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
	pub name: String,
	pub address: String,
	pub overall_avg: Option<f64>,
}

/// Calculate the arithmetic mean of a slice of values.
pub fn mean(values: &[f64]) -> Option<f64> {
	if values.is_empty() {
		return None;
	}
	let sum: f64 = values.iter().sum();
	Some(sum / values.len() as f64)
}

/// Compute avg/min/max over successful latencies, None if there are none.
pub fn summarize(latencies: &[f64]) -> Option<LatencySummary> {
	let avg = mean(latencies)?;
	let min = latencies.iter().copied().fold(f64::INFINITY, f64::min);
	let max = latencies.iter().copied().fold(f64::NEG_INFINITY, f64::max);
	Some(LatencySummary { avg, min, max })
}

fn index_by_addr(results: &[ProviderResult]) -> HashMap<SocketAddr, &ProviderResult> {
	results.iter().map(|r| (r.addr, r)).collect()
}

/// Build detail rows in provider-then-domain order.
///
/// Results are matched to providers by address, so completion order does not
/// matter. Providers without a result are skipped.
pub fn detail_rows(providers: &[Provider], results: &[ProviderResult]) -> Vec<DetailRow> {
	let by_addr = index_by_addr(results);
	let mut rows = Vec::new();
	for provider in providers {
		let Some(result) = by_addr.get(&provider.addr) else {
			continue;
		};
		for stats in &result.domains {
			rows.push(DetailRow {
				name: provider.name.clone(),
				address: provider.address(),
				domain: stats.domain.clone(),
				latency: stats.latency,
			});
		}
	}
	rows
}

/// Build summary rows sorted by overall average, ascending.
///
/// Providers that resolved nothing go last, keeping their configured order.
pub fn summary_rows(providers: &[Provider], results: &[ProviderResult]) -> Vec<SummaryRow> {
	let by_addr = index_by_addr(results);
	let mut rows: Vec<SummaryRow> = providers.iter()
		.filter_map(|provider| {
			by_addr.get(&provider.addr).map(|result| SummaryRow {
				name: provider.name.clone(),
				address: provider.address(),
				overall_avg: result.overall_avg(),
			})
		})
		.collect();
	rank_summary(&mut rows);
	rows
}

/// Stable sort: numeric averages ascending, failed providers after all of them.
pub fn rank_summary(rows: &mut [SummaryRow]) {
	rows.sort_by(|a, b| match (a.overall_avg, b.overall_avg) {
		(Some(x), Some(y)) => x.total_cmp(&y),
		(Some(_), None) => std::cmp::Ordering::Less,
		(None, Some(_)) => std::cmp::Ordering::Greater,
		(None, None) => std::cmp::Ordering::Equal,
	});
}
