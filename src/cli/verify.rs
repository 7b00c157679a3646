use std::path::PathBuf;

use plugdeps::DependencyMap;
use tracing::info;

pub(crate) fn run(manifests: Vec<PathBuf>, format: super::Format) {
    let mut maps: Vec<DependencyMap> = Vec::with_capacity(manifests.len());
    for path in &manifests {
        match plugdeps::load_manifest(path) {
            Ok(map) => maps.push(map),
            Err(e) => {
                eprintln!("plugdeps verify: {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    let conflicts = plugdeps::find_conflicts(&maps);
    info!(
        manifests = maps.len(),
        conflicts = conflicts.len(),
        "verified dependency manifests"
    );

    match format {
        super::Format::Text => {
            for c in &conflicts {
                println!("{c}");
            }
            if conflicts.is_empty() {
                eprintln!("No dependency conflicts found.");
            }
        }
        super::Format::Json => super::print_json(&conflicts),
    }

    if !conflicts.is_empty() {
        std::process::exit(1);
    }
}
