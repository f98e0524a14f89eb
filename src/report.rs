/*!
 * Reporting functionality for repotxt
 *
 * Prints a summary of a finished run using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::scanner::ScanStatistics;

/// Summary of one run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Root name
    pub name: String,
    /// Where the document was written
    pub destination: String,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Scan statistics
    pub statistics: ScanStatistics,
}

/// Report generator for scan results
pub struct Reporter;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    key: &'static str,

    #[tabled(rename = "Value")]
    value: String,
}

impl Reporter {
    /// Format a number with human-readable units
    pub fn format_number(num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate the report table
    pub fn generate_report(report: &ScanReport) -> String {
        let stats = &report.statistics;
        let mut rows = vec![
            SummaryRow {
                key: "Repository",
                value: report.name.clone(),
            },
            SummaryRow {
                key: "Output",
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Directories",
                value: Self::format_number(stats.directories),
            },
            SummaryRow {
                key: "Files Included",
                value: Self::format_number(stats.files_included),
            },
        ];

        if stats.latin1_decoded > 0 {
            rows.push(SummaryRow {
                key: "Latin-1 Decoded",
                value: Self::format_number(stats.latin1_decoded),
            });
        }

        for (key, count) in [
            ("Skipped (binary)", stats.skipped_binary),
            ("Skipped (no encoding)", stats.skipped_missing_encoding),
            ("Skipped (undecodable)", stats.skipped_decode),
            ("Skipped (read error)", stats.skipped_error),
        ] {
            if count > 0 {
                rows.push(SummaryRow {
                    key,
                    value: Self::format_number(count),
                });
            }
        }

        // Rough estimate: four characters per token
        rows.push(SummaryRow {
            key: "LLM Tokens",
            value: format!("{} (estimated)", Self::format_number(stats.total_chars / 4)),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        format!("EXTRACTION COMPLETE\n{}", table)
    }

    /// Print the report to stderr
    pub fn print_report(report: &ScanReport) {
        eprintln!("\n{}", Self::generate_report(report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(Reporter::format_number(999), "999");
        assert_eq!(Reporter::format_number(1_500), "1.5K");
        assert_eq!(Reporter::format_number(2_300_000), "2.3M");
    }

    #[test]
    fn test_report_lists_only_nonzero_skips() {
        let report = ScanReport {
            name: "demo".to_string(),
            destination: "demo_contents.txt".to_string(),
            duration: Duration::from_millis(12),
            statistics: ScanStatistics {
                directories: 2,
                files_included: 3,
                skipped_binary: 1,
                total_chars: 4_000,
                ..Default::default()
            },
        };

        let text = Reporter::generate_report(&report);
        assert!(text.contains("demo_contents.txt"));
        assert!(text.contains("Skipped (binary)"));
        assert!(!text.contains("Skipped (read error)"));
        assert!(text.contains("1.0K (estimated)"));
    }
}
