use serde::{Deserialize, Serialize};

/// Number of pollutant features the model consumes.
pub const N_FEATURES: usize = 6;

/// CSV column names in the exact order the model artifact expects.
pub const FEATURE_COLUMNS: [&str; N_FEATURES] = [
    "pm_sepuluh",
    "pm_duakomalima",
    "sulfur_dioksida",
    "karbon_monoksida",
    "ozon",
    "nitrogen_dioksida",
];

/// Human-readable names of the same columns, used in tables and exports.
pub const FEATURE_LABELS: [&str; N_FEATURES] = ["PM10", "PM2.5", "SO2", "CO", "O3", "NO2"];

/// Optional ground-truth column in uploaded CSV files.
pub const ACTUAL_COLUMN: &str = "max";

/// One set of pollutant concentrations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    /// Particulate matter ≤ 10µm
    pub pm10: f64,

    /// Particulate matter ≤ 2.5µm
    pub pm25: f64,

    /// Sulfur dioxide
    pub so2: f64,

    /// Carbon monoxide
    pub co: f64,

    /// Ozone
    pub o3: f64,

    /// Nitrogen dioxide
    pub no2: f64,
}

impl PollutantReading {
    pub fn new(pm10: f64, pm25: f64, so2: f64, co: f64, o3: f64, no2: f64) -> Self {
        Self {
            pm10,
            pm25,
            so2,
            co,
            o3,
            no2,
        }
    }

    /// Build a reading from a feature row in model order.
    pub fn from_features(features: [f64; N_FEATURES]) -> Self {
        let [pm10, pm25, so2, co, o3, no2] = features;
        Self::new(pm10, pm25, so2, co, o3, no2)
    }

    /// Feature row in model order.
    pub fn features(&self) -> [f64; N_FEATURES] {
        [self.pm10, self.pm25, self.so2, self.co, self.o3, self.no2]
    }

    /// Name of the first field that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.features()
            .iter()
            .zip(FEATURE_COLUMNS)
            .find(|(v, _)| !v.is_finite())
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_follow_model_order() {
        let reading = PollutantReading::new(50.0, 30.0, 12.0, 1.5, 100.0, 35.0);
        assert_eq!(reading.features(), [50.0, 30.0, 12.0, 1.5, 100.0, 35.0]);
        assert_eq!(PollutantReading::from_features(reading.features()), reading);
    }

    #[test]
    fn test_first_non_finite() {
        let ok = PollutantReading::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(ok.first_non_finite(), None);

        let bad = PollutantReading::new(1.0, 2.0, 3.0, f64::NAN, 5.0, f64::INFINITY);
        assert_eq!(bad.first_non_finite(), Some("karbon_monoksida"));
    }

    #[test]
    fn test_negative_values_are_kept() {
        let reading = PollutantReading::new(-1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(reading.pm10, -1.0);
        assert_eq!(reading.first_non_finite(), None);
    }
}
