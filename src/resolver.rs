use std::net::SocketAddr;

use anyhow::{anyhow, Result};

use crate::transport::{display_addr, Provider};

/// Parse a provider address string into a socket address.
///
/// Supports formats:
///   "1.1.1.1"              -- IPv4, default port 53
///   "1.1.1.1:53"           -- IPv4 with explicit port
///   "2606:4700::1111"      -- bare IPv6, default port 53
///   "[2606:4700::1111]:53" -- bracketed IPv6 with port
pub fn parse_addr(input: &str) -> Result<SocketAddr> {
	let trimmed = input.trim();
	if trimmed.is_empty() {
		return Err(anyhow!("empty provider address"));
	}

	let addr: SocketAddr = if trimmed.starts_with('[') {
		// Bracketed IPv6 with port: [::1]:53
		trimmed.parse()
			.map_err(|e| anyhow!("invalid bracketed IPv6 address '{}': {}", trimmed, e))?
	} else if trimmed.contains("::") || trimmed.matches(':').count() > 1 {
		// Bare IPv6 address without port
		let ip = trimmed.parse()
			.map_err(|e| anyhow!("invalid IPv6 address '{}': {}", trimmed, e))?;
		SocketAddr::new(ip, 53)
	} else if let Ok(addr) = trimmed.parse::<SocketAddr>() {
		// IPv4 with port (e.g. "8.8.8.8:5353")
		addr
	} else {
		// Plain IPv4 without port
		let ip = trimmed.parse()
			.map_err(|e| anyhow!("invalid IP address '{}': {}", trimmed, e))?;
		SocketAddr::new(ip, 53)
	};
	Ok(addr)
}

/// Parse a user-supplied provider; its address doubles as its name.
pub fn parse_provider(input: &str) -> Result<Provider> {
	let addr = parse_addr(input)?;
	Ok(Provider::new(display_addr(addr), addr))
}

/// Return a new provider list with `extra` merged over `base`.
///
/// An entry whose name matches an existing provider replaces it in place,
/// anything else is appended. `base` is left untouched.
pub fn merge_providers(base: &[Provider], extra: &[Provider]) -> Vec<Provider> {
	let mut merged = base.to_vec();
	for p in extra {
		match merged.iter_mut().find(|m| m.name == p.name) {
			Some(existing) => existing.addr = p.addr,
			None => merged.push(p.clone()),
		}
	}
	merged
}

/// Return the built-in provider table.
pub fn default_providers() -> Vec<Provider> {
	const DEFAULTS: [(&str, [u8; 4]); 15] = [
		("Google DNS", [8, 8, 8, 8]),
		("Cloudflare DNS 1", [1, 1, 1, 1]),
		("Cloudflare DNS 2", [1, 0, 0, 1]),
		("OpenDNS 1", [208, 67, 222, 123]),
		("OpenDNS 2", [208, 67, 222, 222]),
		("Level3 DNS", [4, 2, 2, 1]),
		("Quad9 DNS", [9, 9, 9, 9]),
		("AdGuard DNS", [176, 103, 130, 132]),
		("Comodo Secure DNS", [8, 26, 56, 26]),
		("NextDNS 1", [45, 90, 28, 202]),
		("NextDNS 2", [45, 90, 28, 0]),
		("FIOS Default 1", [71, 252, 0, 12]),
		("FIOS Default 2", [68, 237, 161, 12]),
		("FIOS VA Opt-Out", [71, 252, 0, 14]),
		("FIOS NY Opt-Out", [68, 237, 161, 14]),
	];
	DEFAULTS.iter()
		.map(|(name, octets)| Provider::new(*name, SocketAddr::from((*octets, 53))))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ipv4_no_port() {
		let addr = parse_addr("1.1.1.1").unwrap();
		assert_eq!(addr.port(), 53);
		assert_eq!(addr.ip().to_string(), "1.1.1.1");
	}

	#[test]
	fn test_ipv4_with_port() {
		let addr = parse_addr("8.8.8.8:5353").unwrap();
		assert_eq!(addr.port(), 5353);
		assert_eq!(addr.ip().to_string(), "8.8.8.8");
	}

	#[test]
	fn test_ipv6_bare() {
		let addr = parse_addr("2606:4700::1111").unwrap();
		assert_eq!(addr.port(), 53);
	}

	#[test]
	fn test_ipv6_bracketed() {
		let addr = parse_addr("[2606:4700::1111]:53").unwrap();
		assert_eq!(addr.port(), 53);
	}

	#[test]
	fn test_invalid_input() {
		assert!(parse_addr("not-an-ip").is_err());
		assert!(parse_addr("  ").is_err());
	}

	#[test]
	fn test_user_provider_named_by_address() {
		let p = parse_provider("9.9.9.10").unwrap();
		assert_eq!(p.name, "9.9.9.10");
		assert_eq!(p.address(), "9.9.9.10");
	}

	#[test]
	fn test_defaults() {
		let defaults = default_providers();
		assert_eq!(defaults.len(), 15);
		assert_eq!(defaults[0].name, "Google DNS");
		assert_eq!(defaults[0].address(), "8.8.8.8");
		assert_eq!(defaults[14].address(), "68.237.161.14");
	}

	#[test]
	fn test_merge_appends_and_keeps_base() {
		let base = default_providers();
		let extra = vec![parse_provider("9.9.9.10").unwrap()];
		let merged = merge_providers(&base, &extra);
		assert_eq!(merged.len(), 16);
		assert_eq!(merged[15].name, "9.9.9.10");
		assert_eq!(base.len(), 15);
	}

	#[test]
	fn test_merge_overrides_same_name() {
		let base = vec![parse_provider("1.1.1.1").unwrap()];
		let extra = vec![Provider::new("1.1.1.1", "1.1.1.1:5353".parse().unwrap())];
		let merged = merge_providers(&base, &extra);
		assert_eq!(merged.len(), 1);
		assert_eq!(merged[0].addr.port(), 5353);
	}

	#[test]
	fn test_merge_duplicate_address_keeps_both_names() {
		// "8.8.8.8" is a new name even though Google DNS already uses the address
		let merged = merge_providers(
			&default_providers(),
			&[parse_provider("8.8.8.8").unwrap()],
		);
		let same_addr = merged.iter().filter(|p| p.address() == "8.8.8.8").count();
		assert_eq!(same_addr, 2);
	}
}
