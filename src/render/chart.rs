//! Inline SVG charts comparing predictions with ground truth.

use std::fmt::Write;

use super::fmt_value;

const PREDICTED_COLOR: &str = "skyblue";
const ACTUAL_COLOR: &str = "lightgreen";
const TITLE: &str = "Perbandingan Prediksi dan Aktual";

/// Vertical extent of a chart, always including zero.
struct Scale {
    min: f64,
    max: f64,
    top: f64,
    height: f64,
}

impl Scale {
    fn new(values: impl Iterator<Item = f64>, top: f64, height: f64) -> Self {
        let (mut min, mut max) = (0.0_f64, 0.0_f64);
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        if max - min < f64::EPSILON {
            max = min + 1.0;
        }
        Self {
            min,
            max,
            top,
            height,
        }
    }

    fn y(&self, value: f64) -> f64 {
        self.top + (self.max - value) / (self.max - self.min) * self.height
    }
}

/// Two bars: the single prediction and its actual value.
pub fn bar_chart_svg(predicted: f64, actual: f64) -> String {
    const WIDTH: f64 = 420.0;
    const HEIGHT: f64 = 320.0;
    const LEFT: f64 = 60.0;
    const TOP: f64 = 40.0;
    const PLOT_H: f64 = 230.0;
    const BAR_W: f64 = 110.0;

    let scale = Scale::new([predicted, actual].into_iter(), TOP, PLOT_H);
    let baseline = scale.y(0.0);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = write!(
        svg,
        r#"<text x="{}" y="22" text-anchor="middle" font-weight="bold">{}</text>"#,
        WIDTH / 2.0,
        TITLE
    );
    let _ = write!(
        svg,
        r#"<text x="16" y="{y}" transform="rotate(-90 16 {y})" text-anchor="middle">Nilai ISPU</text>"#,
        y = TOP + PLOT_H / 2.0
    );
    let _ = write!(
        svg,
        r##"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#333"/>"##,
        l = LEFT,
        r = WIDTH - 20.0,
        b = baseline
    );

    for (i, (label, value, color)) in [
        ("Prediksi", predicted, PREDICTED_COLOR),
        ("Aktual", actual, ACTUAL_COLOR),
    ]
    .into_iter()
    .enumerate()
    {
        let x = LEFT + 40.0 + i as f64 * (BAR_W + 60.0);
        let y = scale.y(value).min(baseline);
        let h = (scale.y(value) - baseline).abs();
        let _ = write!(
            svg,
            r#"<rect class="bar" x="{x}" y="{y:.2}" width="{w}" height="{h:.2}" fill="{color}"/>"#,
            w = BAR_W
        );
        let _ = write!(
            svg,
            r#"<text x="{cx}" y="{ty:.2}" text-anchor="middle" fill="white" font-weight="bold" font-size="13">{v}</text>"#,
            cx = x + BAR_W / 2.0,
            ty = y + 18.0,
            v = fmt_value(value)
        );
        let _ = write!(
            svg,
            r#"<text x="{cx}" y="{ly}" text-anchor="middle">{label}</text>"#,
            cx = x + BAR_W / 2.0,
            ly = TOP + PLOT_H + 24.0
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Two line series across a batch, x = row index.
pub fn line_chart_svg(predicted: &[f64], actual: &[f64]) -> String {
    const WIDTH: f64 = 820.0;
    const HEIGHT: f64 = 380.0;
    const LEFT: f64 = 60.0;
    const RIGHT: f64 = 20.0;
    const TOP: f64 = 40.0;
    const PLOT_H: f64 = 280.0;

    let scale = Scale::new(predicted.iter().chain(actual).copied(), TOP, PLOT_H);
    let n = predicted.len().max(actual.len());
    let plot_w = WIDTH - LEFT - RIGHT;
    let x_of = |i: usize| {
        if n <= 1 {
            LEFT + plot_w / 2.0
        } else {
            LEFT + i as f64 / (n - 1) as f64 * plot_w
        }
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = write!(
        svg,
        r#"<text x="{}" y="22" text-anchor="middle" font-weight="bold">{}</text>"#,
        WIDTH / 2.0,
        TITLE
    );
    let _ = write!(
        svg,
        r#"<text x="16" y="{y}" transform="rotate(-90 16 {y})" text-anchor="middle">Nilai ISPU</text>"#,
        y = TOP + PLOT_H / 2.0
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" text-anchor="middle">Index Data</text>"#,
        x = LEFT + plot_w / 2.0,
        y = HEIGHT - 12.0
    );
    let _ = write!(
        svg,
        r##"<rect x="{LEFT}" y="{TOP}" width="{plot_w}" height="{PLOT_H}" fill="none" stroke="#ccc"/>"##
    );

    for (label, series, color, legend_y) in [
        ("Prediksi", predicted, PREDICTED_COLOR, TOP + 14.0),
        ("Aktual", actual, ACTUAL_COLOR, TOP + 32.0),
    ] {
        let points: Vec<String> = series
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:.2},{:.2}", x_of(i), scale.y(*v)))
            .collect();
        let _ = write!(
            svg,
            r#"<polyline class="series" data-label="{label}" points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
            points.join(" ")
        );
        let lx = WIDTH - RIGHT - 110.0;
        let _ = write!(
            svg,
            r#"<line x1="{lx}" y1="{legend_y}" x2="{x2}" y2="{legend_y}" stroke="{color}" stroke-width="3"/><text x="{tx}" y="{ty}">{label}</text>"#,
            x2 = lx + 24.0,
            tx = lx + 30.0,
            ty = legend_y + 4.0
        );
    }

    svg.push_str("</svg>");
    svg
}
