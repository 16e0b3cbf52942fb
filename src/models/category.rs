use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Upper bounds (inclusive) of the first four categories.
pub const GOOD_MAX: f64 = 50.0;
pub const MODERATE_MAX: f64 = 100.0;
pub const UNHEALTHY_MAX: f64 = 200.0;
pub const VERY_UNHEALTHY_MAX: f64 = 300.0;

/// ISPU severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum SeverityCategory {
    Good,
    Moderate,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl SeverityCategory {
    /// Classify an ISPU value.
    ///
    /// Each threshold belongs to the lower bucket. Values are compared as
    /// given, so negatives land in `Good` and NaN (never ≤ anything) lands
    /// in `Hazardous`.
    pub fn categorize(value: f64) -> Self {
        if value <= GOOD_MAX {
            SeverityCategory::Good
        } else if value <= MODERATE_MAX {
            SeverityCategory::Moderate
        } else if value <= UNHEALTHY_MAX {
            SeverityCategory::Unhealthy
        } else if value <= VERY_UNHEALTHY_MAX {
            SeverityCategory::VeryUnhealthy
        } else {
            SeverityCategory::Hazardous
        }
    }

    /// Display label shown on the dashboard and in exports
    pub fn label(&self) -> &'static str {
        match self {
            SeverityCategory::Good => "Baik",
            SeverityCategory::Moderate => "Sedang",
            SeverityCategory::Unhealthy => "Tidak Sehat",
            SeverityCategory::VeryUnhealthy => "Sangat Tidak Sehat",
            SeverityCategory::Hazardous => "Berbahaya",
        }
    }

    /// CSS color name
    pub fn color(&self) -> &'static str {
        match self {
            SeverityCategory::Good => "green",
            SeverityCategory::Moderate => "blue",
            SeverityCategory::Unhealthy => "orange",
            SeverityCategory::VeryUnhealthy => "red",
            SeverityCategory::Hazardous => "black",
        }
    }

    /// RGB value of [`color`](Self::color), for spreadsheet formats
    pub fn rgb(&self) -> u32 {
        match self {
            SeverityCategory::Good => 0x008000,
            SeverityCategory::Moderate => 0x0000FF,
            SeverityCategory::Unhealthy => 0xFFA500,
            SeverityCategory::VeryUnhealthy => 0xFF0000,
            SeverityCategory::Hazardous => 0x000000,
        }
    }

    /// Index range as printed in the reference table
    pub fn index_range(&self) -> &'static str {
        match self {
            SeverityCategory::Good => "0 - 50",
            SeverityCategory::Moderate => "51 - 100",
            SeverityCategory::Unhealthy => "101 - 200",
            SeverityCategory::VeryUnhealthy => "201 - 300",
            SeverityCategory::Hazardous => "> 300",
        }
    }

    /// Health implication of the category
    pub fn description(&self) -> &'static str {
        match self {
            SeverityCategory::Good => {
                "Tidak berdampak pada kesehatan manusia dan hewan, serta tidak merusak lingkungan."
            }
            SeverityCategory::Moderate => {
                "Tidak berdampak pada kesehatan manusia, tetapi bisa berdampak pada estetika atau tanaman."
            }
            SeverityCategory::Unhealthy => {
                "Mulai berdampak pada kelompok sensitif dan spesies tertentu."
            }
            SeverityCategory::VeryUnhealthy => {
                "Berisiko terhadap sebagian kelompok populasi yang terpapar."
            }
            SeverityCategory::Hazardous => {
                "Tingkat yang dianggap berbahaya dan dapat memengaruhi kesehatan semua populasi."
            }
        }
    }

    /// Look a category up by its display label
    pub fn from_label(label: &str) -> Option<Self> {
        SeverityCategory::iter().find(|c| c.label() == label)
    }
}

/// Row of the static category reference table.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub category: SeverityCategory,
    pub label: &'static str,
    pub color: &'static str,
    pub index_range: &'static str,
    pub description: &'static str,
}

impl From<SeverityCategory> for CategoryInfo {
    fn from(category: SeverityCategory) -> Self {
        Self {
            category,
            label: category.label(),
            color: category.color(),
            index_range: category.index_range(),
            description: category.description(),
        }
    }
}

/// All five categories in ascending severity.
pub fn reference_table() -> Vec<CategoryInfo> {
    SeverityCategory::iter().map(CategoryInfo::from).collect()
}
