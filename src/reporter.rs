use crate::errors::{FindmeError, FindmeResult};
use crate::models::{ExportedReport, ScanInfo, ScanReport};
use console::style;
use std::path::Path;

fn marker(symbol: &str) -> String {
    format!(
        "{}{}{}",
        style("[").green(),
        style(symbol).red(),
        style("]").green()
    )
}

/// Lines printed after the progress bar.
pub fn render_results(report: &ScanReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.found_count() + 2);

    if report.found.is_empty() {
        lines.push(style("[-] No accounts found.").red().bold().to_string());
    } else {
        for account in &report.found {
            lines.push(format!(
                "{} {}: {}",
                marker("+"),
                style(&account.platform).green().bold(),
                account.url
            ));
        }
    }

    lines.push(String::new());
    if report.cancelled {
        lines.push(format!(
            "{} {}",
            marker("!"),
            style(format!(
                "Search interrupted after {}/{} platforms.",
                report.completed, report.total
            ))
            .yellow()
            .bold()
        ));
    } else {
        lines.push(format!("{} {}", marker("*"), style("Search completed.").green().bold()));
    }
    lines
}

pub fn print_results(report: &ScanReport) {
    for line in render_results(report) {
        println!("{}", line);
    }
}

pub fn print_search_header(username: &str, total: usize, quiet: bool) {
    println!(
        "\n{} {}{}",
        marker("*"),
        style("Checking username ").green().bold(),
        style(username).red().bold()
    );
    if !quiet && total > 0 {
        println!("{}", style(format!("Searching across {} platforms...", total)).cyan());
    }
    println!();
}

/// Write the report and scan info as pretty JSON.
pub fn export_json(report: &ScanReport, scan_info: &ScanInfo, path: &Path) -> FindmeResult<()> {
    log::info!("Writing JSON results to: {:?}", path);
    let exported = ExportedReport {
        scan_info: scan_info.clone(),
        report: report.clone(),
    };
    let json = serde_json::to_string_pretty(&exported)?;
    std::fs::write(path, json).map_err(|e| FindmeError::io(e, path.to_path_buf()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoundAccount;
    use console::strip_ansi_codes;
    use tempfile::TempDir;

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .iter()
            .map(|l| strip_ansi_codes(l).into_owned())
            .collect()
    }

    fn report_with(found: &[(&str, &str)]) -> ScanReport {
        ScanReport {
            found: found
                .iter()
                .map(|(platform, url)| FoundAccount {
                    platform: platform.to_string(),
                    url: url.to_string(),
                })
                .collect(),
            total: 5,
            completed: 5,
            errors: 1,
            cancelled: false,
        }
    }

    #[test]
    fn test_found_lines() {
        let lines = plain(render_results(&report_with(&[
            ("GitHub", "https://github.com/bob"),
            ("Keybase", "https://keybase.io/bob"),
        ])));
        assert_eq!(lines[0], "[+] GitHub: https://github.com/bob");
        assert_eq!(lines[1], "[+] Keybase: https://keybase.io/bob");
        assert_eq!(lines.last().map(String::as_str), Some("[*] Search completed."));
    }

    #[test]
    fn test_no_accounts_line() {
        let lines = plain(render_results(&report_with(&[])));
        assert_eq!(lines[0], "[-] No accounts found.");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_interrupted_summary() {
        let mut report = report_with(&[]);
        report.completed = 2;
        report.cancelled = true;
        let lines = plain(render_results(&report));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("[!] Search interrupted after 2/5 platforms.")
        );
    }

    #[test]
    fn test_export_json() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("report.json");
        let report = report_with(&[("GitHub", "https://github.com/bob")]);
        let info = ScanInfo {
            username: "bob".into(),
            start_time: "2026-01-01 10:00:00".into(),
            end_time: "2026-01-01 10:00:03".into(),
            duration_seconds: 3.0,
            concurrency: 10,
            timeout_seconds: 5,
        };

        export_json(&report, &info, &path)?;

        let exported: ExportedReport = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(exported.report, report);
        assert_eq!(exported.scan_info.username, "bob");
        Ok(())
    }

    #[test]
    fn test_export_to_missing_dir_fails_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let info = ScanInfo {
            username: "bob".into(),
            start_time: String::new(),
            end_time: String::new(),
            duration_seconds: 0.0,
            concurrency: 1,
            timeout_seconds: 5,
        };
        let err = export_json(&ScanReport::default(), &info, &path).unwrap_err();
        assert!(matches!(err, FindmeError::Io { path: Some(_), .. }));
    }
}
