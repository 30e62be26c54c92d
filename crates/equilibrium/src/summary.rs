//! Human-readable summaries for `--format summary`

use crate::output;
use equilibrium_core::sort::sorted_tags;
use equilibrium_core::types::TagsDocument;
use equilibrium_core::AnalysisReport;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct MissingRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Should Point To")]
    digest: String,
}

#[derive(Tabled)]
struct MismatchedRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Expected")]
    expected: String,
    #[tabled(rename = "Actual")]
    actual: String,
}

#[derive(Tabled)]
struct UnexpectedRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Currently Points To")]
    digest: String,
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Digest")]
    digest: String,
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Overview, status and per-category tables of an analysis
pub fn render_analysis(report: &AnalysisReport) -> String {
    let diff = &report.diff;
    let mut lines = vec![
        format!("Repository URL: {}", report.repository_url),
        String::new(),
        output::header("Analysis Overview:"),
        table(vec![
            MetricRow {
                metric: "Expected tags",
                count: report.expected_count,
            },
            MetricRow {
                metric: "Actual tags",
                count: report.actual_count,
            },
            MetricRow {
                metric: "Missing tags",
                count: diff.missing_tags.len(),
            },
            MetricRow {
                metric: "Mismatched tags",
                count: diff.mismatched_tags.len(),
            },
            MetricRow {
                metric: "Unexpected tags",
                count: diff.unexpected_tags.len(),
            },
        ]),
        String::new(),
    ];

    let status = diff.status.as_str().to_uppercase().replace('_', " ");
    let mark = if diff.status.is_perfect() {
        output::success_mark()
    } else {
        output::warning_mark()
    };
    lines.push(format!("{} Status: {}", mark, status));
    lines.push(String::new());

    if !diff.missing_tags.is_empty() {
        lines.push(output::header("Missing Tags (should be created):"));
        lines.push(table(
            sorted_tags(diff.missing_tags.keys())
                .into_iter()
                .map(|tag| MissingRow {
                    tag: tag.to_string(),
                    digest: diff.missing_tags[tag].short().to_string(),
                })
                .collect(),
        ));
        lines.push(String::new());
    }

    if !diff.mismatched_tags.is_empty() {
        lines.push(output::header("Mismatched Tags (pointing to wrong version):"));
        lines.push(table(
            sorted_tags(diff.mismatched_tags.keys())
                .into_iter()
                .map(|tag| {
                    let digests = &diff.mismatched_tags[tag];
                    MismatchedRow {
                        tag: tag.to_string(),
                        expected: digests.expected.short().to_string(),
                        actual: digests.actual.short().to_string(),
                    }
                })
                .collect(),
        ));
        lines.push(String::new());
    }

    if !diff.unexpected_tags.is_empty() {
        lines.push(output::header("Unexpected Tags (should be removed):"));
        lines.push(table(
            sorted_tags(diff.unexpected_tags.keys())
                .into_iter()
                .map(|tag| UnexpectedRow {
                    tag: tag.to_string(),
                    digest: diff.unexpected_tags[tag].short().to_string(),
                })
                .collect(),
        ));
        lines.push(String::new());
    }

    if diff.status.is_perfect() {
        lines.push(format!(
            "{} Registry is in perfect equilibrium!",
            output::success_mark()
        ));
    } else {
        lines.push("To see detailed remediation commands, use:".to_string());
        lines.push(
            "  equilibrium analyze --expected expected.json --actual actual.json --format json | jq '.remediation_plan'"
                .to_string(),
        );
    }

    lines.join("\n")
}

/// Repository header and Tag/Version/Digest table of a tags document
pub fn render_tags(document: &TagsDocument, kind: &str) -> String {
    let rows: Vec<TagRow> = sorted_tags(document.digests.keys())
        .into_iter()
        .map(|tag| TagRow {
            tag: tag.to_string(),
            version: document
                .canonical_versions
                .get(tag)
                .map(ToString::to_string)
                .unwrap_or_default(),
            digest: document.digests[tag].to_string(),
        })
        .collect();

    [
        format!("Repository: {}", document.repository_name),
        format!("URL: {}", document.repository_url),
        String::new(),
        format!("{} mutable tags ({}):", kind, document.digests.len()),
        String::new(),
        table(rows),
    ]
    .join("\n")
}
