use crate::models::GeoSummaryRow;

/// Plain-text table of the whole summary, printed after a run.
pub fn format_summary_table(rows: &[GeoSummaryRow]) -> String {
    let mut output = String::from("=== SUMMARY BY GEO ===\n");

    if rows.is_empty() {
        output.push_str("(no data after filtering)\n");
        return output;
    }

    let width = rows
        .iter()
        .map(|r| r.geo.chars().count())
        .max()
        .unwrap_or(0)
        .max("geo".len());

    output.push_str(&format!(
        "{:<width$}  {:>8}  {:>7}  {:>5}\n",
        "geo",
        "learning",
        "waiting",
        "total",
        width = width
    ));
    for row in rows {
        output.push_str(&format!(
            "{:<width$}  {:>8}  {:>7}  {:>5}\n",
            row.geo,
            row.learning_count,
            row.waiting_count,
            row.total_count,
            width = width
        ));
    }

    output
}

/// Short ranked digest: the `top` geographies by total, largest first.
pub fn format_preview(rows: &[GeoSummaryRow], top: usize) -> String {
    if rows.is_empty() {
        return "Summary is empty (0 rows).".to_string();
    }

    let mut ranked: Vec<&GeoSummaryRow> = rows.iter().collect();
    ranked.sort_by(|a, b| {
        b.total_count
            .cmp(&a.total_count)
            .then_with(|| a.geo.cmp(&b.geo))
    });

    let mut lines = vec![format!("Summary (top {}):", top)];
    for row in ranked.into_iter().take(top) {
        lines.push(format!(
            "- {}: learning {}, waiting {}, total {}",
            row.geo, row.learning_count, row.waiting_count, row.total_count
        ));
    }
    lines.join("\n")
}
