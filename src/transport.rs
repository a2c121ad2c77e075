use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use clap::ValueEnum;

/// A DNS provider under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
	pub name: String,
	pub addr: SocketAddr,
}

impl Provider {
	pub fn new(name: impl Into<String>, addr: SocketAddr) -> Self {
		Provider { name: name.into(), addr }
	}

	/// Address as shown in reports: the bare IP for port 53, otherwise ip:port.
	pub fn address(&self) -> String {
		display_addr(self.addr)
	}
}

pub fn display_addr(addr: SocketAddr) -> String {
	if addr.port() == 53 {
		addr.ip().to_string()
	} else {
		addr.to_string()
	}
}

/// DNS record type queried for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordType {
	#[value(name = "A")]
	A,
	#[value(name = "AAAA")]
	AAAA,
	#[value(name = "TXT")]
	TXT,
	#[value(name = "MX")]
	MX,
	#[value(name = "NS")]
	NS,
	#[value(name = "CNAME")]
	CNAME,
}

impl RecordType {
	pub fn as_str(&self) -> &'static str {
		match self {
			RecordType::A => "A",
			RecordType::AAAA => "AAAA",
			RecordType::TXT => "TXT",
			RecordType::MX => "MX",
			RecordType::NS => "NS",
			RecordType::CNAME => "CNAME",
		}
	}
}

impl fmt::Display for RecordType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<RecordType> for hickory_proto::rr::RecordType {
	fn from(rt: RecordType) -> Self {
		match rt {
			RecordType::A => hickory_proto::rr::RecordType::A,
			RecordType::AAAA => hickory_proto::rr::RecordType::AAAA,
			RecordType::TXT => hickory_proto::rr::RecordType::TXT,
			RecordType::MX => hickory_proto::rr::RecordType::MX,
			RecordType::NS => hickory_proto::rr::RecordType::NS,
			RecordType::CNAME => hickory_proto::rr::RecordType::CNAME,
		}
	}
}

/// Why a single query did not produce an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
	NxDomain,
	NoAnswer,
	Timeout,
}

impl fmt::Display for FailureReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			FailureReason::NxDomain => "NXDOMAIN",
			FailureReason::NoAnswer => "NoAnswer",
			FailureReason::Timeout => "Timeout",
		};
		f.write_str(s)
	}
}

/// Result of a single DNS query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryOutcome {
	Success(Duration),
	Failure(FailureReason),
}

/// Benchmark configuration, fixed for the whole run
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
	pub record_type: RecordType,
	pub num_queries: usize,
	pub timeout: Duration,
}

impl Default for BenchmarkConfig {
	fn default() -> Self {
		BenchmarkConfig {
			record_type: RecordType::A,
			num_queries: 10,
			timeout: Duration::from_millis(5000),
		}
	}
}
