//! Dependency manifests: YAML (or JSON) documents mapping root plugins to
//! the plugins they require.
//!
//! ```yaml
//! kubernetes:1.15.7:
//!   - cloudbees-folder:6.9
//!   - credentials:2.3.0
//! workflow-job:2.33: []
//! ```

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::errors::Result;
use crate::plugin::Plugin;
use crate::verify::DependencyMap;

/// Root entries in document order, repeated keys included.
struct RootEntries(Vec<(String, Option<Vec<String>>)>);

impl<'de> Deserialize<'de> for RootEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RootEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of root plugins to dependency lists")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    entries.push(entry);
                }
                Ok(RootEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Parse a manifest document into a dependency map.
///
/// Keys and list items are `name:version` strings. A root with a null value
/// has no dependencies, and a blank or null document has no roots. A root
/// listed more than once keeps the dependencies of every listing, so
/// conflicts between them still reach the verifier. The first malformed
/// plugin string aborts parsing.
pub fn parse_manifest(content: &str) -> Result<DependencyMap> {
    if content.trim().is_empty() {
        return Ok(DependencyMap::new());
    }

    let entries = serde_yaml_ng::from_str::<Option<RootEntries>>(content)?
        .map(|e| e.0)
        .unwrap_or_default();
    let mut map = DependencyMap::with_capacity(entries.len());
    for (root, deps) in entries {
        let root = Plugin::parse(&root)?;
        let deps = deps
            .unwrap_or_default()
            .iter()
            .map(|d| Plugin::parse(d))
            .collect::<Result<Vec<_>>>()?;
        if map.contains_key(&root) {
            debug!(root = %root, "merging repeated root entry");
        }
        map.entry(root).or_default().extend(deps);
    }
    Ok(map)
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<DependencyMap> {
    let content = std::fs::read_to_string(path)?;
    let map = parse_manifest(&content)?;
    debug!(path = %path.display(), roots = map.len(), "loaded dependency manifest");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PluginError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parse_yaml_manifest() {
        let map = parse_manifest(
            "kubernetes:1.15.7:\n  - cloudbees-folder:6.9\n  - credentials:2.3.0\nworkflow-job:2.33: []\n",
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        let root = Plugin::parse("kubernetes:1.15.7").unwrap();
        let deps: Vec<String> = map[&root].iter().map(ToString::to_string).collect();
        assert_eq!(deps, vec!["cloudbees-folder:6.9", "credentials:2.3.0"]);
        assert!(map[&Plugin::parse("workflow-job:2.33").unwrap()].is_empty());
    }

    #[test]
    fn parse_json_manifest() {
        let map = parse_manifest(r#"{ "git:4.0.0": ["scm-api:2.6.3"] }"#).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn null_dependencies_are_empty() {
        let map = parse_manifest("git:4.0.0:\n").unwrap();
        assert!(map[&Plugin::parse("git:4.0.0").unwrap()].is_empty());
    }

    #[test]
    fn blank_document_is_empty_map() {
        assert!(parse_manifest("  \n").unwrap().is_empty());
    }

    #[test]
    fn null_document_is_empty_map() {
        assert!(parse_manifest("null\n").unwrap().is_empty());
        assert!(parse_manifest("~\n").unwrap().is_empty());
    }

    #[test]
    fn repeated_root_keeps_every_listing() {
        let map = parse_manifest("RootA:1.0:\n  - Dep:1.0\nRootA:1.0:\n  - Dep:2.0\n").unwrap();
        assert_eq!(map.len(), 1);
        let deps: Vec<String> = map[&Plugin::parse("RootA:1.0").unwrap()]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(deps, vec!["Dep:1.0", "Dep:2.0"]);
        assert_eq!(crate::verify::verify_dependencies(&[map]).len(), 2);
    }

    #[test]
    fn invalid_root_is_format_error() {
        let err = parse_manifest("\"no-version\": []\n").unwrap_err();
        assert!(matches!(err, PluginError::Format { .. }));
        assert_eq!(err.to_string(), "invalid plugin format 'no-version'");
    }

    #[test]
    fn invalid_dependency_is_format_error() {
        let err = parse_manifest("git:4.0.0:\n  - \"bad name:1.0\"\n").unwrap_err();
        assert!(err.to_string().starts_with("invalid plugin name 'bad name:1.0'"));
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let err = parse_manifest("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, PluginError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plugins.yaml");
        fs::write(&path, "git:4.0.0:\n  - scm-api:2.6.3\n").unwrap();
        let map = load_manifest(&path).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_manifest(Path::new("/nonexistent/plugins.yaml")).unwrap_err();
        assert!(matches!(err, PluginError::Io(_)));
    }
}
