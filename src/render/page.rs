use std::fmt::Write;

use super::chart::{bar_chart_svg, line_chart_svg};
use super::table::{batch_table_html, reference_table_html};
use super::{escape_html, fmt_value};
use crate::batch::BatchResult;
use crate::models::{EvaluationOutcome, PollutantReading, PredictionResult, FEATURE_COLUMNS};

/// Manual input fields: form name and label, in model order.
pub const MANUAL_FIELDS: [(&str, &str); 6] = [
    ("pm10", "PM10 (Particulate Matter 10)"),
    ("pm25", "PM2.5 (Particulate Matter 2.5)"),
    ("so2", "SO2 (Sulfur Dioksida)"),
    ("co", "CO (Karbon Monoksida)"),
    ("o3", "O3 (Ozon)"),
    ("no2", "NO2 (Nitrogen Dioksida)"),
];

const STYLE: &str = r#"
body { font-family: sans-serif; background: #eef1f4; }
.block-container { max-width: 850px; margin: auto; padding: 1.5rem; background-color: #f9f9f9; border-radius: 10px; }
h1 { text-align: center; color: #2c3e50; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: .5rem 1rem; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #2c3e50; font-weight: bold; }
.panel { display: none; padding-top: 1rem; }
#tab-manual:checked ~ #panel-manual, #tab-csv:checked ~ #panel-csv { display: block; }
.field { margin: .4rem 0; }
.field label { display: block; font-size: .9rem; }
.success { background: #e6f4ea; padding: .6rem; border-radius: 6px; }
.warning { background: #fff4e5; padding: .6rem; border-radius: 6px; }
.error { background: #fdecea; padding: .6rem; border-radius: 6px; }
.result-table, .ispu-table { border-collapse: collapse; width: 100%; margin-top: 10px; }
.result-table td, .result-table th, .ispu-table td, .ispu-table th { border: 1px solid #ddd; padding: 6px; }
.ispu-table tr:nth-child(even) { background-color: #f2f2f2; }
.ispu-table th { text-align: left; background-color: #003262; color: white; }
"#;

/// Which input tab is open when the page loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Manual,
    Upload,
}

/// The dashboard page, assembled from whatever the current action produced.
#[derive(Debug, Clone, Default)]
pub struct DashboardPage {
    tab: Tab,
    reading: Option<PollutantReading>,
    manual_result: String,
    upload_result: String,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill the manual form with the submitted values
    pub fn with_reading(mut self, reading: PollutantReading) -> Self {
        self.reading = Some(reading);
        self
    }

    /// Show a fresh prediction and ask for the actual value.
    ///
    /// Call after [`with_reading`](Self::with_reading) so the reading is
    /// carried into the evaluation form.
    pub fn with_prediction(mut self, prediction: &PredictionResult) -> Self {
        self.tab = Tab::Manual;
        let category = prediction.category;
        let _ = write!(
            self.manual_result,
            r#"<p class="success">Prediksi Nilai ISPU: {value}</p>
<p><span style="color:{color}; font-weight:bold;">Kategori Kualitas Udara: {label}</span></p>"#,
            value = fmt_value(prediction.value),
            color = category.color(),
            label = category.label()
        );
        self.manual_result
            .push_str(&actual_form(prediction.value, None, self.reading.as_ref()));
        self
    }

    /// Show the verdict and bar chart for a prediction/actual pair
    pub fn with_evaluation(mut self, predicted: f64, outcome: &EvaluationOutcome) -> Self {
        self.tab = Tab::Manual;
        self.manual_result.push_str(&actual_form(
            predicted,
            Some(outcome.actual),
            self.reading.as_ref(),
        ));
        let class = if outcome.verdict.needs_review() {
            "warning"
        } else {
            "success"
        };
        let _ = write!(
            self.manual_result,
            r#"<p class="{}">{}</p><p>Selisih: {}</p>"#,
            class,
            outcome.verdict.message(),
            fmt_value(outcome.difference)
        );
        self.manual_result
            .push_str(&bar_chart_svg(predicted, outcome.actual));
        self
    }

    pub fn with_manual_error(mut self, message: &str) -> Self {
        self.tab = Tab::Manual;
        let _ = write!(
            self.manual_result,
            r#"<p class="error">{}</p>"#,
            escape_html(message)
        );
        self
    }

    /// Show the processed upload, its chart and an export form
    pub fn with_batch(mut self, batch: &BatchResult, csv_source: &str) -> Self {
        self.tab = Tab::Upload;
        let out = &mut self.upload_result;

        if batch.has_actual {
            out.push_str(
                r#"<p class="success">Kolom nilai aktual ditemukan. Melakukan evaluasi...</p>
<h3>Hasil Prediksi dan Evaluasi:</h3>"#,
            );
        } else {
            out.push_str(
                r#"<p class="success">Menampilkan hasil prediksi (tanpa evaluasi karena kolom 'max' tidak tersedia).</p>
<h3>Hasil Prediksi:</h3>"#,
            );
        }
        out.push_str(&batch_table_html(batch));

        let _ = write!(
            out,
            r#"<form method="post" action="/upload/export" enctype="multipart/form-data">
<textarea name="csv" hidden>{}</textarea>
<button type="submit">📥 Unduh Hasil Prediksi dalam Format Excel</button>
</form>"#,
            escape_html(csv_source)
        );

        if let Some(actuals) = batch.actuals() {
            out.push_str("<h3>Visualisasi Prediksi vs Aktual</h3>");
            out.push_str(&line_chart_svg(&batch.predictions(), &actuals));
        }
        self
    }

    /// Report a failed upload; nothing of the batch is shown
    pub fn with_upload_error(mut self, message: &str) -> Self {
        self.tab = Tab::Upload;
        let _ = write!(
            self.upload_result,
            r#"<p class="error">{}</p>"#,
            escape_html(message)
        );
        self
    }

    pub fn render(&self) -> String {
        let (manual_checked, csv_checked) = match self.tab {
            Tab::Manual => (" checked", ""),
            Tab::Upload => ("", " checked"),
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<title>Sistem Prediksi Kualitas Udara</title>
<style>{style}</style>
</head>
<body>
<div class="block-container">
<h1>Sistem Prediksi Kualitas Udara Jakarta Timur</h1>
<p>Prediksi dilakukan berdasarkan Nilai Indeks Standar Pencemar Udara (ISPU). ISPU adalah angka yang tidak mempunyai satuan dengan kegunaan untuk menggambarkan keadaan kualitas udara sekitar area tertentu dan didasarkan pada dampak terhadap kesehatan manusia, nilai estetika, dan makhluk hidup lainnya.</p>
<div class="tabs">
<input type="radio" name="tab" id="tab-manual"{manual_checked}><label for="tab-manual">Input Manual</label>
<input type="radio" name="tab" id="tab-csv"{csv_checked}><label for="tab-csv">Unggah CSV</label>
<section class="panel" id="panel-manual">
<h2>Masukkan Nilai Parameter Pencemar Udara</h2>
{manual_form}
{manual_result}
</section>
<section class="panel" id="panel-csv">
<h2>Unggah File CSV</h2>
{csv_help}
<form method="post" action="/upload" enctype="multipart/form-data">
<input type="file" name="file" accept=".csv" required>
<button type="submit">Proses</button>
</form>
{upload_result}
</section>
</div>
<details>
<summary>Lihat Penjelasan Kategori ISPU</summary>
{reference}
</details>
</div>
</body>
</html>
"#,
            style = STYLE,
            manual_form = manual_form(self.reading.as_ref()),
            manual_result = self.manual_result,
            csv_help = csv_help(),
            upload_result = self.upload_result,
            reference = reference_table_html(),
        )
    }
}

fn manual_form(reading: Option<&PollutantReading>) -> String {
    let values = reading.map(|r| r.features()).unwrap_or_default();
    let mut html = String::from(r#"<form method="post" action="/predict">"#);
    for ((name, label), value) in MANUAL_FIELDS.iter().zip(values) {
        let _ = write!(
            html,
            r#"<div class="field"><label for="{name}">{label}</label><input type="number" id="{name}" name="{name}" min="0" max="500" step="any" value="{value}" required></div>"#
        );
    }
    html.push_str(r#"<button type="submit">Prediksi Kualitas Udara</button></form>"#);
    html
}

/// Form for the ground-truth value. The prediction and its inputs travel
/// along as hidden fields.
fn actual_form(predicted: f64, actual: Option<f64>, reading: Option<&PollutantReading>) -> String {
    let actual = actual.map(|a| a.to_string()).unwrap_or_default();
    let mut hidden = String::new();
    if let Some(reading) = reading {
        for ((name, _), value) in MANUAL_FIELDS.iter().zip(reading.features()) {
            let _ = write!(
                hidden,
                r#"<input type="hidden" name="{name}" value="{value}">"#
            );
        }
    }
    format!(
        r#"<form method="post" action="/evaluate">
<input type="hidden" name="predicted" value="{predicted}">{hidden}
<div class="field"><label for="actual">Masukkan Nilai Aktual ISPU</label><input type="number" id="actual" name="actual" min="0" step="any" value="{actual}" required></div>
<p><b>Hasil Prediksi:</b> {shown}</p>
<button type="submit">Evaluasi</button>
</form>"#,
        shown = fmt_value(predicted)
    )
}

fn csv_help() -> String {
    let mut html = String::from(
        "<h4>📌 Format CSV yang Diperlukan:</h4><p>Silakan unggah file CSV dengan kolom-kolom sebagai berikut:</p><ul>",
    );
    for col in FEATURE_COLUMNS {
        let _ = write!(html, "<li><b>{}</b></li>", col);
    }
    html.push_str("<li><b>max</b> (opsional)</li></ul>");
    let _ = write!(
        html,
        "<p>Contoh isi file:</p><pre>{}\n50,30,12,1.5,100,35\n70,45,20,2.0,80,40</pre>",
        FEATURE_COLUMNS.join(",")
    );
    html.push_str(
        "<p><b>Catatan:</b> File harus dalam format <code>.csv</code> dan berisi angka-angka numerik saja.</p>",
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchRow;
    use crate::models::evaluate;

    #[test]
    fn test_index_page_has_both_inputs() {
        let html = DashboardPage::new().render();
        assert!(html.contains(r#"action="/predict""#));
        assert!(html.contains(r#"action="/upload""#));
        assert!(html.contains(r#"accept=".csv""#));
        for (name, _) in MANUAL_FIELDS {
            assert!(html.contains(&format!(r#"name="{}""#, name)));
        }
        assert!(html.contains(r#"max="500""#));
        assert!(html.contains("Lihat Penjelasan Kategori ISPU"));
    }

    #[test]
    fn test_prediction_threads_value_into_actual_form() {
        let html = DashboardPage::new()
            .with_prediction(&PredictionResult::new(87.25))
            .render();
        assert!(html.contains("Prediksi Nilai ISPU: 87.25"));
        assert!(html.contains(r#"name="predicted" value="87.25""#));
        assert!(html.contains("Kategori Kualitas Udara: Sedang"));
    }

    #[test]
    fn test_reading_is_carried_into_evaluation_form() {
        let reading = PollutantReading::new(50.0, 30.0, 12.0, 1.5, 100.0, 35.0);
        let html = DashboardPage::new()
            .with_reading(reading)
            .with_prediction(&PredictionResult::new(60.0))
            .render();
        assert!(html.contains(r#"<input type="hidden" name="co" value="1.5">"#));
        assert!(html.contains(r#"id="o3" name="o3" min="0" max="500" step="any" value="100""#));
    }

    #[test]
    fn test_evaluation_shows_verdict_and_chart() {
        let outcome = evaluate(120.0, 118.5);
        let html = DashboardPage::new().with_evaluation(120.0, &outcome).render();
        assert!(html.contains("Perlu evaluasi, Prediksi dan nilai aktual berbeda cukup jauh."));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn test_batch_without_actual_has_no_chart() {
        let batch = BatchResult {
            rows: vec![BatchRow {
                reading: PollutantReading::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
                prediction: PredictionResult::new(10.0),
                evaluation: None,
            }],
            has_actual: false,
        };
        let html = DashboardPage::new().with_batch(&batch, "a,b\n1,2").render();
        assert!(html.contains("tanpa evaluasi"));
        assert!(!html.contains("<svg"));
        assert!(html.contains(r#"id="tab-csv" checked"#));
    }

    #[test]
    fn test_upload_error_is_escaped() {
        let html = DashboardPage::new()
            .with_upload_error("Gagal memproses karena: <bad>")
            .render();
        assert!(html.contains("Gagal memproses karena: &lt;bad&gt;"));
        assert!(!html.contains(r#"<table class="result-table""#));
    }
}
