/// Return the built-in domain list.
pub fn default_domains() -> Vec<String> {
	["google.com", "apple.com", "office365.com", "icloud.com"]
		.iter()
		.map(|d| d.to_string())
		.collect()
}

/// Return a new domain list with `extra` appended after `base`.
pub fn merge_domains(base: &[String], extra: &[String]) -> Vec<String> {
	let mut merged = base.to_vec();
	merged.extend(extra.iter().map(|d| d.trim().to_string()).filter(|d| !d.is_empty()));
	merged
}
