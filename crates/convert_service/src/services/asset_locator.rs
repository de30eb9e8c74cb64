//! Discovery of the static `public` directory across deployment layouts.
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const INDEX_FILE: &str = "index.html";

const PUBLIC_DIR_NAME: &str = "public";
const ANCESTOR_LEVELS: usize = 4;
const ROOT_SEARCH_LEVELS: usize = 10;
const ROOT_MARKERS: &[&str] = &["Cargo.toml", "package.json", "go.mod", "vercel.json"];
const HOSTED_ROOTS: &[&str] = &["/var/task", "/vercel/path0", "/home/site"];

/// Finds the directory static assets are served from.
pub trait AssetLocator: Send + Sync {
    /// The first usable asset directory, if any.
    fn locate(&self) -> Option<PathBuf>;

    fn index_path(&self) -> Option<PathBuf> {
        self.locate().map(|dir| dir.join(INDEX_FILE))
    }
}

/// Searches an ordered list of candidate directories; a candidate is usable
/// when it contains `index.html`.
///
/// The filesystem is scanned on the first `locate` only; later calls return
/// the cached result.
#[derive(Debug, Clone)]
pub struct PublicDirLocator {
    candidates: Vec<PathBuf>,
    located: OnceLock<Option<PathBuf>>,
}

impl PublicDirLocator {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        let mut unique: Vec<PathBuf> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        Self {
            candidates: unique,
            located: OnceLock::new(),
        }
    }

    /// Candidates for the current process: the explicit directory first,
    /// then hosted-platform paths when `VERCEL` is set, then the working
    /// directory and its ancestors, then the nearest project root.
    pub fn from_environment(explicit: Option<PathBuf>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let hosted = std::env::var_os("VERCEL").is_some();
        let project_path = std::env::var_os("VERCEL_PROJECT_PATH").map(PathBuf::from);
        if hosted {
            tracing::info!("running in hosted environment");
        }
        Self::new(build_candidates(&cwd, explicit, hosted, project_path))
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    fn scan(&self) -> Option<PathBuf> {
        for dir in &self.candidates {
            if dir.join(INDEX_FILE).is_file() {
                tracing::debug!(dir = %dir.display(), "found public directory");
                return Some(dir.clone());
            }
            if dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "directory exists but has no index.html");
            }
        }
        tracing::warn!(
            candidates = self.candidates.len(),
            "could not find public directory in any expected location"
        );
        None
    }
}

impl AssetLocator for PublicDirLocator {
    fn locate(&self) -> Option<PathBuf> {
        self.located.get_or_init(|| self.scan()).clone()
    }
}

fn build_candidates(
    cwd: &Path,
    explicit: Option<PathBuf>,
    hosted: bool,
    project_path: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    candidates.extend(explicit);

    if hosted {
        candidates.extend(project_path.map(|p| p.join(PUBLIC_DIR_NAME)));
        candidates.extend(
            HOSTED_ROOTS
                .iter()
                .map(|root| Path::new(root).join(PUBLIC_DIR_NAME)),
        );
    }

    candidates.extend(
        cwd.ancestors()
            .take(ANCESTOR_LEVELS + 1)
            .map(|dir| dir.join(PUBLIC_DIR_NAME)),
    );

    if let Some(root) = find_project_root(cwd, ROOT_SEARCH_LEVELS) {
        candidates.push(root.join(PUBLIC_DIR_NAME));
    }

    candidates
}

/// Nearest directory at or above `start` holding a project marker file.
fn find_project_root(start: &Path, max_levels: usize) -> Option<PathBuf> {
    start
        .ancestors()
        .take(max_levels)
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn public_dir_with_index(root: &Path) -> PathBuf {
        let public = root.join("public");
        fs::create_dir_all(&public).unwrap();
        fs::write(public.join(INDEX_FILE), "<html></html>").unwrap();
        public
    }

    #[test]
    fn finds_public_dir_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let public = public_dir_with_index(temp.path());
        let cwd = temp.path().join("api").join("handler");
        fs::create_dir_all(&cwd).unwrap();

        let locator = PublicDirLocator::new(build_candidates(&cwd, None, false, None));
        assert_eq!(locator.locate(), Some(public.clone()));
        assert_eq!(locator.index_path(), Some(public.join(INDEX_FILE)));
    }

    #[test]
    fn finds_public_dir_at_project_root_beyond_ancestor_window() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[workspace]").unwrap();
        let public = public_dir_with_index(temp.path());
        let cwd = temp.path().join("a/b/c/d/e/f");
        fs::create_dir_all(&cwd).unwrap();

        let candidates = build_candidates(&cwd, None, false, None);
        assert_eq!(candidates.last(), Some(&public));
        assert_eq!(PublicDirLocator::new(candidates).locate(), Some(public));
    }

    #[test]
    fn explicit_directory_wins() {
        let temp = TempDir::new().unwrap();
        public_dir_with_index(temp.path());
        let explicit = temp.path().join("assets");
        fs::create_dir_all(&explicit).unwrap();
        fs::write(explicit.join(INDEX_FILE), "<html></html>").unwrap();

        let locator =
            PublicDirLocator::new(build_candidates(temp.path(), Some(explicit.clone()), false, None));
        assert_eq!(locator.locate(), Some(explicit));
    }

    #[test]
    fn directory_without_index_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("public")).unwrap();

        let locator = PublicDirLocator::new(vec![temp.path().join("public")]);
        assert_eq!(locator.locate(), None);
        assert_eq!(locator.index_path(), None);
    }

    #[test]
    fn located_directory_is_cached() {
        let temp = TempDir::new().unwrap();
        let public = public_dir_with_index(temp.path());
        let locator = PublicDirLocator::new(vec![public.clone()]);

        assert_eq!(locator.locate(), Some(public.clone()));
        fs::remove_file(public.join(INDEX_FILE)).unwrap();
        assert_eq!(locator.locate(), Some(public));
    }

    #[test]
    fn hosted_candidates_come_before_local_ones() {
        let candidates = build_candidates(
            Path::new("/srv/app"),
            None,
            true,
            Some(PathBuf::from("/projects/site")),
        );
        assert_eq!(candidates[0], PathBuf::from("/projects/site/public"));
        assert_eq!(candidates[1], PathBuf::from("/var/task/public"));
        assert!(candidates.contains(&PathBuf::from("/srv/app/public")));
    }

    #[test]
    fn duplicate_candidates_are_collapsed() {
        let locator = PublicDirLocator::new(vec![
            PathBuf::from("/a/public"),
            PathBuf::from("/a/public"),
            PathBuf::from("/b/public"),
        ]);
        assert_eq!(locator.candidates().len(), 2);
    }
}
