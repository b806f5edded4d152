//! Error types for device description loading and validation.

/// Errors that can occur when loading or validating a `device.toml` description.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the description file.
    #[error("failed to read device description: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse device description: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Two entries of the same kind share a name.
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName {
        /// The kind of entry ("site", "wire", or "pip").
        kind: &'static str,
        /// The repeated name.
        name: String,
    },

    /// A pip refers to a wire that is not declared.
    #[error("pip '{pip}' refers to unknown wire '{wire}'")]
    UnknownWire {
        /// The pip carrying the dangling reference.
        pip: String,
        /// The wire name that could not be found.
        wire: String,
    },

    /// A description value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let err = ConfigError::MissingField("device.name".to_string());
        assert_eq!(format!("{err}"), "missing required field: device.name");
    }

    #[test]
    fn display_duplicate_name() {
        let err = ConfigError::DuplicateName {
            kind: "site",
            name: "SLICE_X0Y0".to_string(),
        };
        assert_eq!(format!("{err}"), "duplicate site name 'SLICE_X0Y0'");
    }

    #[test]
    fn display_unknown_wire() {
        let err = ConfigError::UnknownWire {
            pip: "P0".to_string(),
            wire: "W9".to_string(),
        };
        assert_eq!(format!("{err}"), "pip 'P0' refers to unknown wire 'W9'");
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::IoError(io_err);
        let display = format!("{err}");
        assert!(display.starts_with("failed to read device description:"));
    }
}
