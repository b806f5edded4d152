//! Device description loading and validation.

use crate::error::ConfigError;
use crate::resolve::resolve_description;
use crate::types::DeviceDescription;
use std::collections::HashSet;
use std::path::Path;

/// Loads and validates a device description from a TOML file.
pub fn load_description(path: &Path) -> Result<DeviceDescription, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let description = load_description_from_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        device = %description.device.name,
        "loaded device description"
    );
    Ok(description)
}

/// Parses and validates a device description from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_description_from_str(content: &str) -> Result<DeviceDescription, ConfigError> {
    let description: DeviceDescription =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_description(&description)?;
    Ok(description)
}

/// Checks required fields, name uniqueness, and that every pip endpoint names
/// a declared wire.
fn validate_description(description: &DeviceDescription) -> Result<(), ConfigError> {
    if description.device.name.is_empty() {
        return Err(ConfigError::MissingField("device.name".to_string()));
    }
    for site in &description.sites {
        if site.site_type.is_empty() {
            return Err(ConfigError::MissingField(format!(
                "sites.{}.type",
                site.name
            )));
        }
    }
    check_unique("site", description.sites.iter().map(|s| s.name.as_str()))?;
    check_unique("wire", description.wires.iter().map(|w| w.name.as_str()))?;
    check_unique("pip", description.pips.iter().map(|p| p.name.as_str()))?;
    resolve_description(description)?;
    Ok(())
}

fn check_unique<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(ConfigError::MissingField(format!("{kind}s.name")));
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = r#"
[device]
name = "tiny"

[[sites]]
name = "A"
type = "LUT"

[[sites]]
name = "B"
type = "LUT"
attrs = { BEL = "A6LUT" }

[[sites]]
name = "C"
type = "FF"
global_buf = true

[[wires]]
name = "W0"

[[wires]]
name = "W1"
type = "LOCAL"

[[pips]]
name = "P0"
src = "W0"
dst = "W1"
"#;

    #[test]
    fn parse_tiny_description() {
        let desc = load_description_from_str(TINY).unwrap();
        assert_eq!(desc.device.name, "tiny");
        assert_eq!(desc.device.family, "generic");
        assert_eq!(desc.sites.len(), 3);
        assert_eq!(desc.sites[1].attrs.get("BEL").map(String::as_str), Some("A6LUT"));
        assert!(desc.sites[2].global_buf);
        assert!(!desc.sites[0].hidden);
        assert_eq!(desc.wires[0].wire_type, None);
        assert_eq!(desc.wires[1].wire_type.as_deref(), Some("LOCAL"));
        assert_eq!(desc.pips[0].dst, "W1");
    }

    #[test]
    fn empty_device_name_errors() {
        let toml = "[device]\nname = \"\"\n";
        let err = load_description_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn empty_site_type_errors() {
        let toml = "[device]\nname = \"d\"\n[[sites]]\nname = \"A\"\ntype = \"\"\n";
        let err = load_description_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "sites.A.type"));
    }

    #[test]
    fn duplicate_site_errors() {
        let toml = r#"
[device]
name = "d"
[[sites]]
name = "A"
type = "LUT"
[[sites]]
name = "A"
type = "FF"
"#;
        let err = load_description_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { kind: "site", .. }));
    }

    #[test]
    fn dangling_pip_errors() {
        let toml = r#"
[device]
name = "d"
[[wires]]
name = "W0"
[[pips]]
name = "P0"
src = "W0"
dst = "W7"
"#;
        let err = load_description_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownWire { ref wire, .. } if wire == "W7"));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_description_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.toml");
        std::fs::write(&path, TINY).unwrap();
        let desc = load_description(&path).unwrap();
        assert_eq!(desc.wires.len(), 2);
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_description(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
