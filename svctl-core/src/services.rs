//! Expand user patterns into service directories under the base directory.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;

use crate::supervise::ServiceDir;

#[derive(Debug, Clone)]
pub struct ServiceResolver {
    basedir: PathBuf,
}

impl ServiceResolver {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
        }
    }

    /// Directories matching `pattern`, sorted and free of duplicates.
    ///
    /// Relative patterns are rooted at the base directory; absolute ones are
    /// used as given. With `with_log`, the `log/` child of every match is
    /// included as well.
    pub fn resolve(&self, pattern: &str, with_log: bool) -> Vec<ServiceDir> {
        let full = self.full_pattern(pattern);

        let mut dirs = glob_dirs(&full);
        if with_log {
            dirs.extend(glob_dirs(&format!("{full}/log")));
        }
        dirs.sort();
        dirs.dedup();

        dirs.into_iter()
            .map(|path| {
                let name = self.name_of(&path);
                ServiceDir::new(path, name)
            })
            .collect()
    }

    /// Display name: the path relative to the base directory when possible.
    pub fn name_of(&self, path: &Path) -> String {
        match path.strip_prefix(&self.basedir) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
            _ => path.display().to_string(),
        }
    }

    fn full_pattern(&self, pattern: &str) -> String {
        if Path::new(pattern).is_absolute() {
            return pattern.to_string();
        }
        let base = Pattern::escape(&self.basedir.to_string_lossy());
        let base = base.trim_end_matches('/');
        format!("{base}/{pattern}")
    }
}

fn glob_dirs(pattern: &str) -> Vec<PathBuf> {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            warn!("invalid service pattern {}: {}", pattern, e);
            return Vec::new();
        }
    };

    paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("error listing services: {}", e);
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect()
}
