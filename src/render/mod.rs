//! Server-side HTML for the dashboard.
//!
//! Pages are plain strings; every value that did not originate in this
//! module goes through [`escape_html`].

pub mod chart;
pub mod page;
pub mod table;

pub use chart::{bar_chart_svg, line_chart_svg};
pub use page::{DashboardPage, Tab, MANUAL_FIELDS};
pub use table::{batch_table_html, reference_table_html};

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// ISPU values are always shown with two decimals.
pub fn fmt_value(value: f64) -> String {
    format!("{:.2}", value)
}
