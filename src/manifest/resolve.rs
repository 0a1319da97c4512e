//! Build configuration selection
//!
//! Picks the configuration named on the command line, or the only one the
//! manifest defines, and extracts its `build` command.

use serde::Serialize;

use super::model::{Configuration, Configurations, Manifest};
use crate::error::DetoxError;

/// A build command together with the configuration it came from
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolvedBuild {
    /// Configuration name
    pub name: String,
    /// Non-empty shell command
    pub command: String,
}

impl Manifest {
    /// Resolve the build command for `name`, or for the sole configuration
    ///
    /// # Errors
    /// * `DetoxError::MissingConfigurations` - No `detox.configurations` section
    /// * `DetoxError::AmbiguousConfiguration` - No name given and several configurations exist
    /// * `DetoxError::UnknownConfiguration` - The named configuration does not exist
    /// * `DetoxError::MissingBuildScript` - The selected configuration has no `build`
    pub fn resolve_build(&self, name: Option<&str>) -> Result<ResolvedBuild, DetoxError> {
        let configurations = self.configurations()?;

        let (name, config) = match name {
            Some(name) => configurations.get_key_value(name).ok_or_else(|| {
                DetoxError::UnknownConfiguration {
                    name: name.to_string(),
                    available: configurations.keys().cloned().collect(),
                }
            })?,
            None => sole_configuration(configurations)?,
        };

        let command = config
            .build_command()
            .ok_or_else(|| DetoxError::MissingBuildScript { name: name.clone() })?;

        tracing::debug!("Resolved build for configuration '{}': {}", name, command);

        Ok(ResolvedBuild {
            name: name.clone(),
            command: command.to_string(),
        })
    }
}

fn sole_configuration(
    configurations: &Configurations,
) -> Result<(&String, &Configuration), DetoxError> {
    let mut entries = configurations.iter();
    match (entries.next(), entries.next()) {
        (Some(only), None) => Ok(only),
        _ => Err(DetoxError::AmbiguousConfiguration {
            available: configurations.keys().cloned().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> Manifest {
        Manifest::from_json(json, "package.json").unwrap()
    }

    const TWO_CONFIGS: &str = r#"{ "detox": { "configurations": {
        "only": { "build": "echo \"I was build\"" },
        "myconf": { "build": "echo \"Something else\"" }
    } } }"#;

    #[test]
    fn test_sole_configuration_selected_implicitly() {
        let m = manifest(
            r#"{ "detox": { "configurations": { "only": { "build": "echo \"I was build\"" } } } }"#,
        );

        let resolved = m.resolve_build(None).unwrap();
        assert_eq!(resolved.name, "only");
        assert_eq!(resolved.command, r#"echo "I was build""#);
    }

    #[test]
    fn test_named_configuration_selected() {
        let resolved = manifest(TWO_CONFIGS).resolve_build(Some("myconf")).unwrap();

        assert_eq!(resolved.name, "myconf");
        assert!(resolved.command.contains("Something else"));
    }

    #[test]
    fn test_multiple_configurations_without_name_is_ambiguous() {
        let err = manifest(TWO_CONFIGS).resolve_build(None).unwrap_err();

        match err {
            DetoxError::AmbiguousConfiguration { available } => {
                assert_eq!(available, vec!["myconf", "only"]);
            }
            other => panic!("Expected AmbiguousConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_configurations_section() {
        let err = manifest("{}").resolve_build(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot find detox.configurations in package.json"
        );

        let err = manifest("{}").resolve_build(Some("only")).unwrap_err();
        assert!(matches!(err, DetoxError::MissingConfigurations { .. }));
    }

    #[test]
    fn test_missing_build_script_with_name() {
        let err = manifest(r#"{ "detox": { "configurations": { "only": {} } } }"#)
            .resolve_build(Some("only"))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            r#"Could not find build script in detox.configurations["only"].build"#
        );
    }

    #[test]
    fn test_missing_build_script_without_name() {
        let err = manifest(r#"{ "detox": { "configurations": { "only": {} } } }"#)
            .resolve_build(None)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            r#"Could not find build script in detox.configurations["only"].build"#
        );
    }

    #[test]
    fn test_empty_build_script_is_missing() {
        let err = manifest(r#"{ "detox": { "configurations": { "only": { "build": "" } } } }"#)
            .resolve_build(None)
            .unwrap_err();

        assert!(matches!(err, DetoxError::MissingBuildScript { name } if name == "only"));
    }

    #[test]
    fn test_unknown_configuration_name() {
        let err = manifest(TWO_CONFIGS).resolve_build(Some("android")).unwrap_err();

        match err {
            DetoxError::UnknownConfiguration { name, available } => {
                assert_eq!(name, "android");
                assert_eq!(available, vec!["myconf", "only"]);
            }
            other => panic!("Expected UnknownConfiguration, got {:?}", other),
        }
    }
}
