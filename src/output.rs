use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use comfy_table::{presets::ASCII_FULL, ContentArrangement, Table};

use crate::error::Result;
use crate::stats::{DetailRow, ProviderResult, SummaryRow};
use crate::transport::{display_addr, BenchmarkConfig, Provider, RecordType};

pub const FAILED_DOMAIN: &str = "Failed to resolve";
pub const FAILED_PROVIDER: &str = "Failed to resolve any domains";

const CSV_HEADER: [&str; 8] = [
	"Timestamp", "Provider Name", "IP Address", "Domain", "Query Type",
	"Avg Query Time", "Min Query Time", "Max Query Time",
];

/// Print a summary of the benchmark configuration before running.
///
/// Goes to stderr so stdout carries only the report.
pub fn print_config_summary(
	providers: &[Provider],
	domains: &[String],
	config: &BenchmarkConfig,
) {
	let mut err = std::io::stderr().lock();
	// stderr may already be closed
	let _ = write_config_summary(&mut err, providers, domains, config);
}

pub fn write_config_summary(
	out: &mut impl Write,
	providers: &[Provider],
	domains: &[String],
	config: &BenchmarkConfig,
) -> std::io::Result<()> {
	writeln!(out, "DNS Benchmark Configuration")?;
	writeln!(out, "===========================")?;
	writeln!(out, "Providers:      {}", providers.len())?;
	for p in providers {
		writeln!(out, "  - {} ({})", p.name, p.address())?;
	}
	writeln!(out, "Domains:        {}", domains.join(", "))?;
	writeln!(out, "Record type:    {}", config.record_type)?;
	writeln!(out, "Queries:        {} per domain", config.num_queries)?;
	writeln!(out, "Timeout:        {} ms", config.timeout.as_millis())?;
	writeln!(out)?;
	Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
	let mut table = Table::new();
	table.load_preset(ASCII_FULL);
	table.set_content_arrangement(ContentArrangement::Dynamic);
	table.set_header(header);
	table
}

/// Format detail rows as table cells.
pub fn detail_cells(row: &DetailRow) -> Vec<String> {
	let mut cells = vec![row.name.clone(), row.address.clone(), row.domain.clone()];
	match row.latency {
		Some(l) => cells.extend([
			format!("{:.6}", l.avg),
			format!("{:.6}", l.min),
			format!("{:.6}", l.max),
		]),
		None => cells.extend([
			FAILED_DOMAIN.to_string(),
			"N/A".to_string(),
			"N/A".to_string(),
		]),
	}
	cells
}

/// Format a summary row as table cells.
pub fn summary_cells(row: &SummaryRow) -> Vec<String> {
	let avg = match row.overall_avg {
		Some(avg) => format!("{:.6}", avg),
		None => FAILED_PROVIDER.to_string(),
	};
	vec![row.name.clone(), row.address.clone(), avg]
}

pub fn detail_table(rows: &[DetailRow]) -> Table {
	let mut table = new_table(vec![
		"Provider Name", "IP Address", "Domain",
		"Avg Query Time", "Min Query Time", "Max Query Time",
	]);
	for row in rows {
		table.add_row(detail_cells(row));
	}
	table
}

pub fn summary_table(rows: &[SummaryRow]) -> Table {
	let mut table = new_table(vec!["Provider Name", "IP Address", "Overall Avg Query Time"]);
	for row in rows {
		table.add_row(summary_cells(row));
	}
	table
}

/// Print the detail table followed by the sorted summary table.
pub fn print_report(detail: &[DetailRow], summary: &[SummaryRow]) {
	println!("{}", detail_table(detail));
	println!("\nSummary:");
	println!("{}", summary_table(summary));
}

/// List providers that were cut short by a resolver fault.
pub fn print_faults(results: &[ProviderResult]) {
	let faulted: Vec<&ProviderResult> = results.iter()
		.filter(|r| r.fault.is_some())
		.collect();
	if faulted.is_empty() {
		return;
	}
	println!("\nProvider faults:");
	for r in faulted {
		println!("  {}: {}", display_addr(r.addr), r.fault.as_deref().unwrap_or_default());
	}
}

/// Append detail rows to a CSV log.
///
/// The header is written only when the file does not exist yet. Latencies
/// are raw seconds; fully failed domains leave the latency fields empty.
pub fn append_csv(
	path: &Path,
	rows: &[DetailRow],
	record_type: RecordType,
	timestamp: &str,
) -> Result<()> {
	let is_new = !path.exists();
	let file = OpenOptions::new().create(true).append(true).open(path)?;
	let mut writer = csv::Writer::from_writer(file);

	if is_new {
		writer.write_record(CSV_HEADER)?;
	}

	for row in rows {
		let (avg, min, max) = match row.latency {
			Some(l) => (l.avg.to_string(), l.min.to_string(), l.max.to_string()),
			None => (String::new(), String::new(), String::new()),
		};
		writer.write_record([
			timestamp,
			row.name.as_str(),
			row.address.as_str(),
			row.domain.as_str(),
			record_type.as_str(),
			avg.as_str(),
			min.as_str(),
			max.as_str(),
		])?;
	}

	writer.flush()?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::stats::{summarize, LatencySummary};

	fn failed_row() -> DetailRow {
		DetailRow {
			name: "X".into(),
			address: "1.2.3.4".into(),
			domain: "example.com".into(),
			latency: None,
		}
	}

	fn ok_row(domain: &str, latency: LatencySummary) -> DetailRow {
		DetailRow {
			name: "X".into(),
			address: "1.2.3.4".into(),
			domain: domain.into(),
			latency: Some(latency),
		}
	}

	fn read_lines(path: &Path) -> Vec<String> {
		std::fs::read_to_string(path).unwrap()
			.lines()
			.map(String::from)
			.collect()
	}

	#[test]
	fn test_failed_detail_cells() {
		assert_eq!(
			detail_cells(&failed_row()),
			vec!["X", "1.2.3.4", "example.com", "Failed to resolve", "N/A", "N/A"],
		);
	}

	#[test]
	fn test_failed_summary_cells() {
		let row = SummaryRow { name: "X".into(), address: "1.2.3.4".into(), overall_avg: None };
		assert_eq!(summary_cells(&row), vec!["X", "1.2.3.4", "Failed to resolve any domains"]);
	}

	#[test]
	fn test_latency_cells_six_decimals() {
		let latency = summarize(&[0.010, 0.020, 0.030]).unwrap();
		let cells = detail_cells(&ok_row("example.com", latency));
		assert_eq!(&cells[3..], &["0.020000", "0.010000", "0.030000"]);

		let row = SummaryRow { name: "X".into(), address: "1.2.3.4".into(), overall_avg: Some(0.05) };
		assert_eq!(summary_cells(&row)[2], "0.050000");
	}

	#[test]
	fn test_tables_render_rows() {
		let rendered = detail_table(&[failed_row()]).to_string();
		assert!(rendered.contains("Provider Name"));
		assert!(rendered.contains("Failed to resolve"));

		let summary = summary_table(&[SummaryRow {
			name: "X".into(),
			address: "1.2.3.4".into(),
			overall_avg: Some(0.0125),
		}]).to_string();
		assert!(summary.contains("Overall Avg Query Time"));
		assert!(summary.contains("0.012500"));
	}

	#[test]
	fn test_config_summary_lists_providers() {
		let providers = vec![Provider::new("X", "1.2.3.4:53".parse().unwrap())];
		let domains = vec!["example.com".to_string()];
		let mut buf = Vec::new();
		write_config_summary(&mut buf, &providers, &domains, &BenchmarkConfig::default()).unwrap();
		let text = String::from_utf8(buf).unwrap();
		assert!(text.contains("  - X (1.2.3.4)"));
		assert!(text.contains("Domains:        example.com"));
		assert!(text.contains("Queries:        10 per domain"));
	}

	#[test]
	fn test_csv_header_written_once() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("results.csv");
		let rows = vec![
			ok_row("a.com", LatencySummary { avg: 0.02, min: 0.01, max: 0.03 }),
			failed_row(),
		];

		append_csv(&path, &rows, RecordType::A, "2026-10-14 12:00:00").unwrap();
		let lines = read_lines(&path);
		assert_eq!(lines.len(), 3);
		assert_eq!(lines[0], CSV_HEADER.join(","));
		assert_eq!(lines[1], "2026-10-14 12:00:00,X,1.2.3.4,a.com,A,0.02,0.01,0.03");
		assert_eq!(lines[2], "2026-10-14 12:00:00,X,1.2.3.4,example.com,A,,,");

		append_csv(&path, &rows, RecordType::AAAA, "2026-10-14 12:05:00").unwrap();
		let lines = read_lines(&path);
		assert_eq!(lines.len(), 5);
		let headers = lines.iter().filter(|l| l.starts_with("Timestamp")).count();
		assert_eq!(headers, 1);
		assert!(lines[3].contains(",AAAA,"));
	}

	#[test]
	fn test_csv_existing_file_gets_no_header() {
		let file = tempfile::NamedTempFile::new().unwrap();
		append_csv(file.path(), &[failed_row()], RecordType::TXT, "2026-10-14 12:00:00").unwrap();
		let lines = read_lines(file.path());
		assert_eq!(lines.len(), 1);
		assert!(lines[0].starts_with("2026-10-14 12:00:00,X,"));
	}

	#[test]
	fn test_csv_unwritable_path_errors() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing").join("results.csv");
		assert!(append_csv(&path, &[failed_row()], RecordType::A, "t").is_err());
	}
}
