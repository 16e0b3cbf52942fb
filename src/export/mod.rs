pub mod workbook;

pub use workbook::generate_prediction_workbook;

use rust_xlsxwriter::{Color, Format, FormatBorder};

use crate::models::SeverityCategory;

/// Download name of the exported workbook
pub const EXPORT_FILE_NAME: &str = "hasil_prediksi_ISPU.xlsx";

/// Name of the single worksheet
pub const SHEET_NAME: &str = "Hasil Prediksi";

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Bold header row with a thin border
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C3E50")
        .set_font_color("FFFFFF")
        .set_border(FormatBorder::Thin)
}

/// Two-decimal number format for ISPU values and differences
pub fn create_number_format() -> Format {
    Format::new().set_num_format("0.00")
}

/// Category text in the category's display color
pub fn create_category_format(category: SeverityCategory) -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::RGB(category.rgb()))
}
