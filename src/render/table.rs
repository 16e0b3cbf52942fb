use std::fmt::Write;

use super::{escape_html, fmt_value};
use crate::batch::BatchResult;
use crate::export::workbook::export_headers;
use crate::models::{reference_table, SeverityCategory};

fn category_cell(category: SeverityCategory) -> String {
    format!(
        r#"<td class="kategori" style="color: {};">{}</td>"#,
        category.color(),
        category.label()
    )
}

/// Result table of a batch upload. Columns match the spreadsheet export.
pub fn batch_table_html(batch: &BatchResult) -> String {
    let mut html = String::from(r#"<table class="result-table"><thead><tr><th></th>"#);
    for header in export_headers(batch.has_actual) {
        let _ = write!(html, "<th>{}</th>", header);
    }
    html.push_str("</tr></thead><tbody>");

    for (i, row) in batch.rows.iter().enumerate() {
        let _ = write!(html, "<tr><td>{}</td>", i);
        for value in row.reading.features() {
            let _ = write!(html, "<td>{}</td>", value);
        }

        let evaluation = row.evaluation.filter(|_| batch.has_actual);
        if let Some(eval) = evaluation {
            let _ = write!(html, "<td>{}</td>", eval.actual);
        }
        let _ = write!(html, "<td>{}</td>", fmt_value(row.prediction.value));
        html.push_str(&category_cell(row.prediction.category));
        if let Some(eval) = evaluation {
            let class = if eval.verdict.needs_review() {
                "status review"
            } else {
                "status ok"
            };
            let _ = write!(
                html,
                r#"<td>{}</td><td class="{}">{}</td>"#,
                fmt_value(eval.difference),
                class,
                eval.verdict.label()
            );
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

/// Static table explaining the five ISPU categories.
pub fn reference_table_html() -> String {
    let mut html = String::from(
        r#"<table class="ispu-table"><tr><th>Indeks</th><th>Kategori</th><th>Keterangan</th></tr>"#,
    );
    for info in reference_table() {
        let _ = write!(
            html,
            r#"<tr><td>{}</td><td style="color:{};"><b>{}</b></td><td>{}</td></tr>"#,
            escape_html(info.index_range),
            info.color,
            info.label,
            info.description
        );
    }
    html.push_str("</table>");
    html
}
