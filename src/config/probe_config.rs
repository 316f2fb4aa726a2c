use serde::Deserialize;

/// A YAML file listing extra locations to probe.
///
/// ```yaml
/// targets:
///   - url: https://www.example.com
///   - url: http://localhost:8080/health
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TargetsFile {
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

/// A single target entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Location to probe, validated only when it is probed.
    pub url: String,
}

impl TargetsFile {
    pub fn locations(self) -> impl Iterator<Item = String> {
        self.targets.into_iter().map(|t| t.url)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_targets_deserialization() {
        let yaml = r#"
                    targets:
                        - url: https://www.google.com
                        - url: not even a url
                    "#;

        let file: TargetsFile = serde_yaml::from_str(yaml).expect("Invalid YAML");
        let locations: Vec<String> = file.locations().collect();
        assert_eq!(locations, vec!["https://www.google.com", "not even a url"]);
    }

    #[test]
    fn test_missing_targets_key_is_empty() {
        let file: TargetsFile = serde_yaml::from_str("{}").expect("Invalid YAML");
        assert!(file.targets.is_empty());
    }

    #[test]
    fn test_target_without_url_is_rejected() {
        let yaml = "targets:\n  - accepted_status_codes: [200]\n";
        assert!(serde_yaml::from_str::<TargetsFile>(yaml).is_err());
    }
}
