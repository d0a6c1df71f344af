use crate::ir::RawNode;
use std::path::Path;
use thiserror::Error;

/// The only failure surface of the pipeline: the dataset could not be
/// retrieved or did not parse. There is no retry and no fallback dataset;
/// the caller logs the error and stops.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch dataset: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetch a dataset over HTTP and parse it.
pub fn fetch_dataset(url: &str) -> Result<RawNode, FetchError> {
    let body = ureq::get(url)
        .call()
        .map_err(Box::new)?
        .into_string()?;
    Ok(serde_json::from_str(&body)?)
}

/// Read a dataset from a local JSON file.
pub fn read_dataset(path: &Path) -> Result<RawNode, FetchError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = std::env::temp_dir().join("treemap-renderer-fetch-test");
        std::fs::create_dir_all(&dir).expect("tempdir");
        let path = dir.join("broken.json");
        std::fs::write(&path, "{\"name\": ").expect("write fixture");
        let err = read_dataset(&path).expect_err("should fail");
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_dataset(Path::new("/nonexistent/data.json")).expect_err("should fail");
        assert!(matches!(err, FetchError::Io(_)));
    }
}
