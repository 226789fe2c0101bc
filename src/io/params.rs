//! Model parameter files (JSON).

use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::domain::ModelParams;
use crate::error::AppError;

/// Read and validate a params file. Omitted fields keep their defaults.
pub fn read_params_json(path: &Path) -> Result<ModelParams, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open params JSON '{}': {e}", path.display())))?;
    let params: ModelParams =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid params JSON: {e}")))?;
    params.validate()?;
    Ok(params)
}

/// Write `params` as pretty JSON, creating the parent directory if needed.
pub fn write_params_json(path: &Path, params: &ModelParams) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::input(format!("Failed to create '{}': {e}", parent.display())))?;
    }
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create params JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, params)
        .map_err(|e| AppError::input(format!("Failed to write params JSON: {e}")))?;
    info!(path = %path.display(), "wrote model params");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let params = ModelParams {
            intercept: 0.75,
            inflation_weights: vec![0.7, 0.3],
            ..ModelParams::default()
        };
        write_params_json(&path, &params).unwrap();
        assert_eq!(read_params_json(&path).unwrap(), params);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, r#"{"sentiment_weights": []}"#).unwrap();
        assert_eq!(read_params_json(&path).unwrap_err().exit_code(), 2);
    }
}
