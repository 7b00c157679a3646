pub mod errors;
pub mod manifest;
pub mod plugin;
pub mod verify;

// Re-export key types at crate root for convenience.
pub use errors::{PluginError, Result};
pub use manifest::{load_manifest, parse_manifest};
pub use plugin::{must, Plugin, DOWNLOAD_URL_PATTERN, NAME_PATTERN, VERSION_PATTERN};
pub use verify::{find_conflicts, verify_dependencies, Conflict, DependencyMap};
