use std::path::{Path, PathBuf};

use crate::error::ScanError;

/// What a file on disk is, going by its extension
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    Material,
}

impl ResourceKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ResourceKind::Texture => "tga",
            ResourceKind::Material => "mat",
        }
    }

    pub fn of(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        [ResourceKind::Texture, ResourceKind::Material]
            .into_iter()
            .find(|kind| kind.extension() == extension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn kind(&self) -> Option<ResourceKind> {
        if self.is_dir {
            None
        } else {
            ResourceKind::of(&self.path)
        }
    }
}

/// Entries directly inside `dir`, sorted by path
pub fn enumerate(dir: &Path) -> Result<Vec<FileEntry>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotFound(dir.to_path_buf()));
    }
    let io_error = |source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let is_dir = entry.file_type().map_err(io_error)?.is_dir();
        entries.push(FileEntry {
            path: entry.path(),
            is_dir,
        });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// Resolve a selection: directories contribute the files directly inside them,
/// files are taken as they are.
pub fn expand_selection(selection: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths = Vec::new();
    for path in selection {
        if path.is_dir() {
            paths.extend(
                enumerate(path)?
                    .into_iter()
                    .filter(|entry| !entry.is_dir)
                    .map(|entry| entry.path),
            );
        } else if path.exists() {
            paths.push(path.clone());
        } else {
            return Err(ScanError::NotFound(path.clone()));
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::TempDir;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(ResourceKind::of(Path::new("a/hero_b_$h.tga")), Some(ResourceKind::Texture));
        assert_eq!(ResourceKind::of(Path::new("hero.MAT")), Some(ResourceKind::Material));
        assert_eq!(ResourceKind::of(Path::new("hero.png")), None);
        assert_eq!(ResourceKind::of(Path::new("hero")), None);
    }

    #[test]
    fn test_enumerate_sorted() {
        let dir = TempDir::new("texmatch_enumerate");
        dir.touch("b.tga");
        dir.touch("a.mat");
        dir.mkdir("c");

        let entries = enumerate(dir.path()).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|entry| entry.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mat", "b.tga", "c"]);
        assert_eq!(entries[0].kind(), Some(ResourceKind::Material));
        assert!(entries[2].is_dir);
        assert_eq!(entries[2].kind(), None);
    }

    #[test]
    fn test_enumerate_missing_directory() {
        let dir = TempDir::new("texmatch_enumerate_missing");
        let missing = dir.path().join("nope");
        match enumerate(&missing) {
            Err(ScanError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_expand_selection() {
        let dir = TempDir::new("texmatch_expand");
        let folder = dir.mkdir("materials");
        std::fs::write(folder.join("hero.mat"), b"").unwrap();
        std::fs::create_dir_all(folder.join("nested")).unwrap();
        let single = dir.touch("sword.mat");

        let paths = expand_selection(&[folder.clone(), single.clone()]).unwrap();
        assert_eq!(paths, vec![folder.join("hero.mat"), single]);
    }

    #[test]
    fn test_expand_selection_missing() {
        let dir = TempDir::new("texmatch_expand_missing");
        let missing = dir.path().join("ghost.mat");
        assert!(matches!(
            expand_selection(&[missing]),
            Err(ScanError::NotFound(_))
        ));
    }
}
