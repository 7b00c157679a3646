//! Cross-declaration version consistency checks.
//!
//! Several sources may each declare "root plugin X requires plugin Y at
//! version V". This module finds every pair of declarations that require the
//! same plugin name at different versions.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::plugin::Plugin;

/// One dependency declaration: each root plugin mapped to the plugins it requires.
pub type DependencyMap = HashMap<Plugin, Vec<Plugin>>;

/// A required version plus the `name:version` of the root that declared it.
struct Requirement<'a> {
    version: &'a str,
    origin: String,
}

/// Two requirements on the same plugin name with different versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// Name of the plugin required at two versions.
    pub plugin: String,
    /// `name:version` of the root declaring the first requirement.
    pub origin: String,
    /// Version required by `origin`.
    pub version: String,
    /// `name:version` of the root declaring the second requirement.
    pub other_origin: String,
    /// Version required by `other_origin`.
    pub other_version: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Plugin '{}' requires version '{}' but plugin '{}' requires '{}' for plugin '{}'",
            self.origin, self.version, self.other_origin, self.other_version, self.plugin
        )
    }
}

/// Check that every plugin is required at a single version across all maps.
///
/// Returns one message per conflicting ordered pair, sorted. Empty means
/// the declarations are consistent.
#[must_use]
pub fn verify_dependencies(maps: &[DependencyMap]) -> Vec<String> {
    find_conflicts(maps)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Same as [`verify_dependencies`] but returns structured conflicts.
///
/// Every root is also recorded as a requirement on its own name, so a root
/// declared at two versions in different maps conflicts with itself.
/// Requirements are compared as a full cross product: an asymmetric pair
/// (A, B) is reported both as (A, B) and (B, A).
#[must_use]
pub fn find_conflicts(maps: &[DependencyMap]) -> Vec<Conflict> {
    let requirements = collect_requirements(maps);
    debug!(
        maps = maps.len(),
        plugins = requirements.len(),
        "collected plugin requirements"
    );

    let mut conflicts = Vec::new();
    for (plugin, reqs) in &requirements {
        if reqs.len() == 1 {
            continue;
        }
        for first in reqs {
            for second in reqs {
                if first.version != second.version {
                    conflicts.push(Conflict {
                        plugin: (*plugin).to_string(),
                        origin: first.origin.clone(),
                        version: first.version.to_string(),
                        other_origin: second.origin.clone(),
                        other_version: second.version.to_string(),
                    });
                }
            }
        }
    }

    conflicts.sort_by_cached_key(ToString::to_string);
    debug!(conflicts = conflicts.len(), "dependency verification finished");
    conflicts
}

/// Group every root and dependency by plugin name, tagging each with its root.
fn collect_requirements(maps: &[DependencyMap]) -> BTreeMap<&str, Vec<Requirement<'_>>> {
    let mut requirements: BTreeMap<&str, Vec<Requirement<'_>>> = BTreeMap::new();

    for map in maps {
        for (root, deps) in map {
            let origin = root.to_string();
            trace!(root = %origin, dependencies = deps.len(), "recording root");
            requirements
                .entry(root.name())
                .or_default()
                .push(Requirement {
                    version: root.version(),
                    origin: origin.clone(),
                });
            for dep in deps {
                requirements
                    .entry(dep.name())
                    .or_default()
                    .push(Requirement {
                        version: dep.version(),
                        origin: origin.clone(),
                    });
            }
        }
    }

    requirements
}
