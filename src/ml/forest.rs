//! Random forest regression over trees exported in scikit-learn's array
//! layout. Inference only.

use crate::error::{AppError, Result};
use crate::ml::models::ModelMetadata;
use crate::ml::regressor::Regressor;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// One regression tree as parallel node arrays.
///
/// A node is a leaf when its `children_left` entry is negative; scikit-learn
/// writes `-1` there and `-2` in `feature`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    pub fn n_nodes(&self) -> usize {
        self.feature.len()
    }

    fn is_leaf(&self, idx: usize) -> bool {
        self.children_left[idx] < 0
    }

    /// Check that every node is reachable by forward pointers only, so
    /// `predict_row` always terminates and never indexes out of range.
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        let n = self.n_nodes();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if self.children_left.len() != n
            || self.children_right.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("inconsistent node array lengths".into());
        }

        for idx in 0..n {
            if self.is_leaf(idx) {
                if !self.value[idx].is_finite() {
                    return Err(format!("leaf {} has a non-finite value", idx));
                }
                continue;
            }

            let feature = self.feature[idx];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!(
                    "node {} splits on feature {} (model has {})",
                    idx, feature, n_features
                ));
            }
            for child in [self.children_left[idx], self.children_right[idx]] {
                if child <= idx as i64 || child as usize >= n {
                    return Err(format!("node {} has invalid child {}", idx, child));
                }
            }
        }

        Ok(())
    }

    /// Walk from the root to a leaf; values `<= threshold` go left.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut idx = 0usize;
        while !self.is_leaf(idx) {
            let x = row[self.feature[idx] as usize];
            idx = if x <= self.threshold[idx] {
                self.children_left[idx] as usize
            } else {
                self.children_right[idx] as usize
            };
        }
        self.value[idx]
    }
}

/// Mean of an ensemble of regression trees.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    metadata: ModelMetadata,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    pub fn new(metadata: ModelMetadata, trees: Vec<RegressionTree>) -> Result<Self> {
        if trees.is_empty() {
            return Err(AppError::ModelLoad("forest has no trees".to_string()));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(metadata.n_features)
                .map_err(|e| AppError::ModelLoad(format!("tree {}: {}", i, e)))?;
        }

        Ok(Self { metadata, trees })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for RandomForestRegressor {
    fn predict(&self, features: &Array2<f64>) -> Result<Vec<f64>> {
        if features.ncols() != self.metadata.n_features {
            return Err(AppError::Prediction(format!(
                "expected {} features, got {}",
                self.metadata.n_features,
                features.ncols()
            )));
        }

        let n_trees = self.trees.len() as f64;
        Ok(features
            .rows()
            .into_iter()
            .map(|row| {
                self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>() / n_trees
            })
            .collect())
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
