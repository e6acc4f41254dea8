use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, projecting or drawing price samples
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Price file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed JSON in {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("Unexpected record layout in {}: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },
    #[error("Record {index} has no `{field}` field")]
    MissingField { index: usize, field: &'static str },
    #[error("Record {index} has an out of range timestamp: {value}")]
    InvalidTimestamp { index: usize, value: i64 },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unknown chart variant: '{0}'. Supported: block, time, time-4h")]
    UnknownVariant(String),
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Failed to show chart window: {0}")]
    Display(String),
}

impl ChartError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            ChartError::NotFound(_) => 2,
            ChartError::Io { .. } => 3,
            ChartError::Parse { .. } => 4,
            ChartError::Schema { .. } => 5,
            ChartError::MissingField { .. } => 6,
            ChartError::InvalidTimestamp { .. } => 7,
            ChartError::Config(_) => 64,
            ChartError::UnknownVariant(_) => 65,
            ChartError::Render(_) => 70,
            ChartError::Display(_) => 71,
        }
    }

    /// Classify a `serde_json` failure on the given file
    pub fn from_json(path: PathBuf, err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Syntax | Category::Eof => ChartError::Parse {
                path,
                reason: err.to_string(),
            },
            Category::Data => ChartError::Schema {
                path,
                reason: err.to_string(),
            },
            Category::Io => ChartError::Io {
                path,
                source: err.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_classification() {
        let syntax = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let err = ChartError::from_json(PathBuf::from("price.json"), syntax);
        assert!(matches!(err, ChartError::Parse { .. }));

        let data = serde_json::from_str::<Vec<u64>>("[\"x\"]").unwrap_err();
        let err = ChartError::from_json(PathBuf::from("price.json"), data);
        assert!(matches!(err, ChartError::Schema { .. }));
    }

    #[test]
    fn test_exit_codes_are_nonzero_and_distinct() {
        let errors = [
            ChartError::NotFound(PathBuf::from("price.json")),
            ChartError::Io {
                path: PathBuf::new(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            },
            ChartError::Parse { path: PathBuf::new(), reason: String::new() },
            ChartError::Schema { path: PathBuf::new(), reason: String::new() },
            ChartError::MissingField { index: 0, field: "price" },
            ChartError::InvalidTimestamp { index: 0, value: i64::MAX },
            ChartError::Config(String::new()),
            ChartError::UnknownVariant(String::new()),
            ChartError::Render(String::new()),
            ChartError::Display(String::new()),
        ];
        let codes: Vec<u8> = errors.iter().map(ChartError::exit_code).collect();

        assert!(codes.iter().all(|&c| c != 0));
        for (i, a) in codes.iter().enumerate() {
            assert!(codes[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn test_missing_field_message() {
        let err = ChartError::MissingField { index: 3, field: "price" };
        assert_eq!(err.to_string(), "Record 3 has no `price` field");
    }
}
