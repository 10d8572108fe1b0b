use std::path::{Path, PathBuf};

use texmatch_core::{SourceItem, TargetItem};

use crate::error::ScanError;
use crate::scan::{ResourceKind, enumerate};

/// Turns paths into whatever handle the host uses for loaded resources
pub trait ResourceLoader {
    type Handle;

    fn load(&mut self, path: &Path) -> Result<Self::Handle, ScanError>;

    /// Load only if `path` is of `kind`, otherwise `Ok(None)`
    fn load_of_kind(&mut self, path: &Path, kind: ResourceKind) -> Result<Option<Self::Handle>, ScanError> {
        if ResourceKind::of(path) == Some(kind) {
            self.load(path).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Handle to a resource file that is known to exist
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    pub path: PathBuf,
    pub kind: Option<ResourceKind>,
}

/// Loader that only resolves paths; the file contents stay on disk
#[derive(Debug, Default, Copy, Clone)]
pub struct FsLoader;

impl ResourceLoader for FsLoader {
    type Handle = ResourceHandle;

    fn load(&mut self, path: &Path) -> Result<ResourceHandle, ScanError> {
        if !path.is_file() {
            return Err(ScanError::NotFound(path.to_path_buf()));
        }
        Ok(ResourceHandle {
            path: path.to_path_buf(),
            kind: ResourceKind::of(path),
        })
    }
}

fn stem(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

/// Every texture directly inside `dir`, named by file stem
pub fn load_sources<L: ResourceLoader>(
    loader: &mut L,
    dir: &Path,
) -> Result<Vec<SourceItem<L::Handle>>, ScanError> {
    let mut sources = Vec::new();
    for entry in enumerate(dir)? {
        if entry.kind() != Some(ResourceKind::Texture) {
            continue;
        }
        let Some(name) = stem(&entry.path) else {
            continue;
        };
        if let Some(handle) = loader.load_of_kind(&entry.path, ResourceKind::Texture)? {
            sources.push(SourceItem::new(name, handle));
        }
    }
    tracing::debug!("Loaded {} textures from '{}'", sources.len(), dir.display());
    Ok(sources)
}

/// Every material among `paths`, named by file stem, in the given order
pub fn load_targets<L: ResourceLoader>(
    loader: &mut L,
    paths: &[PathBuf],
) -> Result<Vec<TargetItem<L::Handle>>, ScanError> {
    let mut targets = Vec::new();
    for path in paths {
        let Some(name) = stem(path) else {
            continue;
        };
        if let Some(handle) = loader.load_of_kind(path, ResourceKind::Material)? {
            targets.push(TargetItem::new(name, handle));
        }
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::TempDir;

    #[test]
    fn test_fs_loader_requires_file() {
        let dir = TempDir::new("texmatch_loader");
        let texture = dir.touch("hero_b_$h.tga");

        let handle = FsLoader.load(&texture).unwrap();
        assert_eq!(handle.path, texture);
        assert_eq!(handle.kind, Some(ResourceKind::Texture));

        assert!(matches!(
            FsLoader.load(&dir.path().join("missing.tga")),
            Err(ScanError::NotFound(_))
        ));
        assert!(matches!(FsLoader.load(dir.path()), Err(ScanError::NotFound(_))));
    }

    #[test]
    fn test_load_of_kind_filters() {
        let dir = TempDir::new("texmatch_loader_kind");
        let material = dir.touch("hero.mat");
        assert!(FsLoader.load_of_kind(&material, ResourceKind::Texture).unwrap().is_none());
        assert!(FsLoader.load_of_kind(&material, ResourceKind::Material).unwrap().is_some());
    }

    #[test]
    fn test_load_sources_only_textures() {
        let dir = TempDir::new("texmatch_sources");
        dir.touch("hero_b_$h.tga");
        dir.touch("Hero_N_$h.TGA");
        dir.touch("hero.mat");
        dir.touch("notes.txt");

        let sources = load_sources(&mut FsLoader, dir.path()).unwrap();
        let names: Vec<_> = sources.iter().map(|source| source.name.as_str()).collect();
        assert_eq!(names, vec!["Hero_N_$h", "hero_b_$h"]);
    }

    #[test]
    fn test_load_sources_missing_directory() {
        let dir = TempDir::new("texmatch_sources_missing");
        assert!(matches!(
            load_sources(&mut FsLoader, &dir.path().join("textures")),
            Err(ScanError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_targets_keeps_order() {
        let dir = TempDir::new("texmatch_targets");
        let sword = dir.touch("Sword_mat.mat");
        let texture = dir.touch("hero_b_$h.tga");
        let hero = dir.touch("hero.mat");

        let targets = load_targets(&mut FsLoader, &[sword, texture, hero]).unwrap();
        let names: Vec<_> = targets.iter().map(|target| target.name.as_str()).collect();
        assert_eq!(names, vec!["Sword_mat", "hero"]);
    }
}
