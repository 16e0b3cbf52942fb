//! Integration tests for loading model artifacts from disk.
use ispu_predictor::{
    error::AppError,
    ml::{ModelGateway, ModelType},
    models::{PollutantReading, SeverityCategory},
};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn write_artifact(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

/// Two stumps on ozone and PM2.5; the forest averages them.
const FOREST: &str = r#"{
    "name": "stumps",
    "version": "1",
    "model_type": "random_forest",
    "n_features": 6,
    "feature_names": ["pm_sepuluh", "pm_duakomalima", "sulfur_dioksida",
                      "karbon_monoksida", "ozon", "nitrogen_dioksida"],
    "trees": [
        {
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [4, -2, -2],
            "threshold": [100.0, -2.0, -2.0],
            "value": [0.0, 40.0, 160.0]
        },
        {
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [1, -2, -2],
            "threshold": [50.0, -2.0, -2.0],
            "value": [0.0, 60.0, 240.0]
        }
    ]
}"#;

#[test]
fn test_load_forest_and_predict() {
    let file = write_artifact(FOREST);
    let gateway = ModelGateway::load(file.path()).unwrap();

    assert_eq!(gateway.metadata().name, "stumps");
    assert_eq!(gateway.metadata().model_type, ModelType::RandomForest);
    assert_eq!(gateway.metadata().n_estimators, Some(2));

    // ozone exactly at the threshold goes left: (40 + 60) / 2
    let low = PollutantReading::new(10.0, 50.0, 5.0, 1.0, 100.0, 10.0);
    let result = gateway.predict(&low).unwrap();
    assert_eq!(result.value, 50.0);
    assert_eq!(result.category, SeverityCategory::Good);

    let high = PollutantReading::new(10.0, 80.0, 5.0, 1.0, 150.0, 10.0);
    let result = gateway.predict(&high).unwrap();
    assert_eq!(result.value, 200.0);
    assert_eq!(result.category, SeverityCategory::Unhealthy);
}

#[test]
fn test_batch_prediction_keeps_row_order() {
    let file = write_artifact(FOREST);
    let gateway = ModelGateway::load(file.path()).unwrap();

    let readings = vec![
        PollutantReading::new(10.0, 80.0, 5.0, 1.0, 150.0, 10.0),
        PollutantReading::new(10.0, 10.0, 5.0, 1.0, 10.0, 10.0),
    ];
    let values: Vec<f64> = gateway
        .predict_batch(&readings)
        .unwrap()
        .into_iter()
        .map(|p| p.value)
        .collect();
    assert_eq!(values, vec![200.0, 50.0]);
}

#[test]
fn test_missing_artifact_fails_to_load() {
    let err = ModelGateway::load(Path::new("/nonexistent/model_rf_80.json")).unwrap_err();
    assert!(matches!(err, AppError::ModelLoad(_)));
}

#[test]
fn test_corrupt_artifact_fails_to_load() {
    let file = write_artifact("{ not json");
    assert!(matches!(
        ModelGateway::load(file.path()),
        Err(AppError::ModelLoad(_))
    ));
}

#[test]
fn test_tree_with_backward_pointer_is_rejected() {
    let json = FOREST.replacen("\"children_left\": [1, -1, -1]", "\"children_left\": [0, -1, -1]", 1);
    let file = write_artifact(&json);
    assert!(matches!(
        ModelGateway::load(file.path()),
        Err(AppError::ModelLoad(_))
    ));
}

#[test]
fn test_bundled_demo_model_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/model_rf_80.json");
    let gateway = ModelGateway::load(&path).unwrap();
    assert_eq!(gateway.metadata().model_type, ModelType::RandomForest);

    let reading = PollutantReading::new(50.0, 30.0, 12.0, 1.5, 100.0, 35.0);
    let result = gateway.predict(&reading).unwrap();
    assert!(result.value.is_finite());
    assert!(result.value >= 0.0);
}
