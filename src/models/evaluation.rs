use serde::{Deserialize, Serialize};

/// Review threshold: the RMSE reported when the model was evaluated.
pub const TOLERANCE: f64 = 1.2033;

/// Outcome of comparing a prediction with its ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NoReviewNeeded,
    NeedsReview,
}

impl Verdict {
    /// Short status written to tables and exports
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::NoReviewNeeded => "Tidak perlu evaluasi",
            Verdict::NeedsReview => "Perlu Evaluasi",
        }
    }

    /// Sentence shown after a single manual evaluation
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::NoReviewNeeded => {
                "Tidak perlu dievaluasi, Prediksi dan nilai aktual tidak berbeda jauh."
            }
            Verdict::NeedsReview => "Perlu evaluasi, Prediksi dan nilai aktual berbeda cukup jauh.",
        }
    }

    pub fn needs_review(&self) -> bool {
        matches!(self, Verdict::NeedsReview)
    }

    /// Look a verdict up by its status label
    pub fn from_label(label: &str) -> Option<Self> {
        [Verdict::NoReviewNeeded, Verdict::NeedsReview]
            .into_iter()
            .find(|v| v.label() == label)
    }
}

/// Difference between prediction and ground truth with its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub actual: f64,
    pub difference: f64,
    pub verdict: Verdict,
}

/// Compare `predicted` against `actual`.
///
/// A difference exactly equal to [`TOLERANCE`] does not need review.
pub fn evaluate(predicted: f64, actual: f64) -> EvaluationOutcome {
    let difference = (predicted - actual).abs();
    let verdict = if difference > TOLERANCE {
        Verdict::NeedsReview
    } else {
        Verdict::NoReviewNeeded
    };

    EvaluationOutcome {
        actual,
        difference,
        verdict,
    }
}
