//! Plan reports in JSON and CSV.

use std::fmt::Write;

use camino::Utf8Path;
use rn_core::{EntryKind, PlanEntry};
use rn_engine::{PlanSummary, SummaryLevel};
use serde::Serialize;

/// One plan entry as it appears in a report.
#[derive(Debug, Serialize)]
struct ReportEntry<'a> {
    original_path: &'a Utf8Path,
    original_name: &'a str,
    proposed_name: &'a str,
    kind: EntryKind,
    changed: bool,
}

impl<'a> From<&'a PlanEntry> for ReportEntry<'a> {
    fn from(entry: &'a PlanEntry) -> Self {
        Self {
            original_path: &entry.original_path,
            original_name: entry.original_name(),
            proposed_name: &entry.proposed_name,
            kind: entry.kind,
            changed: entry.is_change(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    root: &'a Utf8Path,
    converter: &'a str,
    level: SummaryLevel,
    summary: &'a PlanSummary,
    warnings: Vec<String>,
    entries: Vec<ReportEntry<'a>>,
}

/// Generates a JSON report with the summary and every plan entry.
pub fn generate_json_report(
    root: &Utf8Path,
    converter: &str,
    plan: &[PlanEntry],
    summary: &PlanSummary,
) -> color_eyre::Result<String> {
    let report = Report {
        root,
        converter,
        level: summary.level(),
        summary,
        warnings: summary.warnings(),
        entries: plan.iter().map(ReportEntry::from).collect(),
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize JSON: {}", e))
}

/// Generates a CSV report with one row per plan entry.
pub fn generate_csv_report(plan: &[PlanEntry]) -> String {
    let mut output = String::from("original_path,proposed_name,kind,changed\n");

    for entry in plan {
        let path = escape_csv(entry.original_path.as_str());
        let proposed = escape_csv(&entry.proposed_name);
        let kind = entry.kind.label();
        let changed = entry.is_change();

        let _ = writeln!(output, "{path},{proposed},{kind},{changed}");
    }

    output
}

/// Escapes a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn sample_plan() -> Vec<PlanEntry> {
        vec![
            PlanEntry::new(Utf8PathBuf::from("/photos/国家.txt"), "國家.txt", EntryKind::File),
            PlanEntry::new(Utf8PathBuf::from("/photos/a,b"), "a,b", EntryKind::Directory),
        ]
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain.txt"), "plain.txt");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_report() {
        insta::assert_snapshot!(generate_csv_report(&sample_plan()), @r#"
        original_path,proposed_name,kind,changed
        /photos/国家.txt,國家.txt,file,true
        "/photos/a,b","a,b",dir,false
        "#);
    }

    #[test]
    fn test_json_report() {
        let plan = sample_plan();
        let summary = rn_engine::evaluate::evaluate(&plan);
        let json = generate_json_report(Utf8Path::new("/photos"), "unavailable", &plan, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["root"], "/photos");
        assert_eq!(value["level"], "ready");
        assert_eq!(value["summary"]["changed"], 1);
        assert_eq!(value["entries"][0]["original_name"], "国家.txt");
        assert_eq!(value["entries"][1]["kind"], "directory");
        assert_eq!(value["warnings"].as_array().map(Vec::len), Some(0));
    }
}
