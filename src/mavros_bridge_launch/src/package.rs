//! Package lookup over ament install prefixes
//!
//! An install prefix holds `share/<package>` for package resources and
//! `lib/<package>/<executable>` for node executables. Prefixes are searched
//! in order and the first hit wins, so overlays listed earlier shadow the
//! underlay.

use std::path::{Path, PathBuf};

const FALLBACK_DISTROS: &[&str] = &["jazzy", "iron", "humble", "galactic", "foxy"];

/// Search prefixes derived from the environment.
///
/// `AMENT_PREFIX_PATH` entries come first, then `/opt/ros/$ROS_DISTRO`, then
/// any installed distribution under `/opt/ros`.
pub fn default_prefixes() -> Vec<PathBuf> {
    let mut prefixes = std::env::var("AMENT_PREFIX_PATH")
        .map(|value| split_prefix_path(&value))
        .unwrap_or_default();

    if let Ok(distro) = std::env::var("ROS_DISTRO") {
        push_unique(&mut prefixes, Path::new("/opt/ros").join(distro));
    }

    for distro in FALLBACK_DISTROS {
        let prefix = Path::new("/opt/ros").join(distro);
        if prefix.is_dir() {
            push_unique(&mut prefixes, prefix);
        }
    }

    log::debug!("Package search prefixes: {:?}", prefixes);
    prefixes
}

/// Split a colon separated prefix list, dropping empty entries
pub fn split_prefix_path(value: &str) -> Vec<PathBuf> {
    let mut prefixes = Vec::new();
    for entry in value.split(':').filter(|entry| !entry.trim().is_empty()) {
        push_unique(&mut prefixes, PathBuf::from(entry.trim()));
    }
    prefixes
}

fn push_unique(prefixes: &mut Vec<PathBuf>, prefix: PathBuf) {
    if !prefixes.contains(&prefix) {
        prefixes.push(prefix);
    }
}

/// Find a package's share directory
pub fn find_package_share(prefixes: &[PathBuf], package_name: &str) -> Option<PathBuf> {
    let found = prefixes
        .iter()
        .map(|prefix| prefix.join("share").join(package_name))
        .find(|share| share.is_dir());

    match &found {
        Some(share) => log::trace!("Found share for {}: {}", package_name, share.display()),
        None => log::debug!("No share directory for package {}", package_name),
    }

    found
}

/// Find an executable installed by a package
pub fn find_executable(prefixes: &[PathBuf], package_name: &str, executable: &str) -> Option<PathBuf> {
    prefixes
        .iter()
        .map(|prefix| prefix.join("lib").join(package_name).join(executable))
        .find(|path| path.is_file())
}
