use console::{measure_text_width, pad_str, style, Alignment, Term};
use libnamecheck::{rate_limited_labels, Availability, LabeledResult, Summary};
use serde::Serialize;

const HEADERS: [&str; 3] = ["Platform", "Status", "Details"];

fn status_text(available: Availability) -> String {
    match available {
        Availability::Available => style("✓ Available").green().to_string(),
        Availability::Taken => style("✗ Taken").red().to_string(),
        Availability::Unknown => style("? Unknown").yellow().to_string(),
    }
}

/// Heading, optional rate-limit warning, result table and summary line.
pub fn render_report(name: &str, rows: &[LabeledResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nChecking availability for: {}\n\n", style(name).bold()));

    let limited = rate_limited_labels(rows);
    if !limited.is_empty() {
        out.push_str(&format!(
            "{}\n\n",
            style(format!("⚠ Rate limited on: {}", limited.join(", "))).yellow()
        ));
    }

    out.push_str(&render_table(rows));

    let summary = Summary::of(rows);
    out.push_str(&format!(
        "\n{} | {} | {}\n",
        style(format!("{} available", summary.available)).green(),
        style(format!("{} taken", summary.taken)).red(),
        style(format!("{} unknown", summary.unknown)).yellow(),
    ));
    out
}

pub fn render_table(rows: &[LabeledResult]) -> String {
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|row| {
            [
                style(&row.label).cyan().to_string(),
                status_text(row.result.available),
                style(&row.result.detail).dim().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(measure_text_width);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(measure_text_width(cell));
        }
    }

    let line = |cols: [&str; 3]| -> String {
        let padded: Vec<_> = cols
            .iter()
            .zip(widths)
            .map(|(c, w)| pad_str(c, w, Alignment::Left, None).into_owned())
            .collect();
        format!("│ {} │\n", padded.join(" │ "))
    };
    let rule = |left: &str, mid: &str, right: &str| -> String {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };

    let mut out = rule("┌", "┬", "┐");
    let headers = HEADERS.map(|h| style(h).bold().to_string());
    out.push_str(&line([headers[0].as_str(), headers[1].as_str(), headers[2].as_str()]));
    out.push_str(&rule("├", "┼", "┤"));
    for row in &cells {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

pub fn separator() -> String {
    let (_, width) = Term::stdout().size();
    "─".repeat(width.max(20) as usize)
}

#[derive(Debug, Serialize)]
struct RowRecord<'a> {
    name: &'a str,
    label: &'a str,
    available: Option<bool>,
    status: Availability,
    detail: &'a str,
}

#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    name: &'a str,
    summary: Summary,
    rate_limited: Vec<String>,
}

/// One JSON object per row, then one summary object.
pub fn render_ndjson(name: &str, rows: &[LabeledResult]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for row in rows {
        let record = RowRecord {
            name,
            label: &row.label,
            available: row.result.available.as_option(),
            status: row.result.available,
            detail: &row.result.detail,
        };
        out.push_str(&serde_json::to_string(&record)?);
        out.push('\n');
    }
    let summary = SummaryRecord {
        name,
        summary: Summary::of(rows),
        rate_limited: rate_limited_labels(rows),
    };
    out.push_str(&serde_json::to_string(&summary)?);
    out.push('\n');
    Ok(out)
}
