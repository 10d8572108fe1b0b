use std::path::PathBuf;

use texmatch_core::{AssignConfig, AssignmentEngine, MatchOutcome, Progress, build_index_with_progress};

use crate::error::{BatchError, ScanError};
use crate::loader::{FsLoader, ResourceHandle, ResourceLoader, load_sources, load_targets};
use crate::scan::expand_selection;
use crate::sink::{MaterialSlots, apply_outcome, clear_all};

/// What to assign: selected materials (files or folders) and where their textures live
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRequest {
    pub selection: Vec<PathBuf>,
    /// Texture directory; defaults to the folder holding the first selected material file
    pub texture_dir: Option<PathBuf>,
    /// Texture bound to unmatched materials when highlighting is on
    pub placeholder: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    Exact,
    Fuzzy { matched: String, distance: usize },
    Unmatched,
}

impl<S, T> From<&MatchOutcome<'_, S, T>> for MatchStatus {
    fn from(outcome: &MatchOutcome<'_, S, T>) -> Self {
        match outcome {
            MatchOutcome::AssignedExact(_) => MatchStatus::Exact,
            MatchOutcome::AssignedFuzzy {
                matched, distance, ..
            } => MatchStatus::Fuzzy {
                matched: matched.clone(),
                distance: *distance,
            },
            MatchOutcome::Unmatched { .. } => MatchStatus::Unmatched,
        }
    }
}

/// Result for one material of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialReport {
    pub material: ResourceHandle,
    pub name: String,
    pub status: MatchStatus,
    pub slots: MaterialSlots<ResourceHandle>,
}

/// Resolve the selection, group the textures and assign them to every selected material.
///
/// Missing directories and channel conflicts abort before any material is matched.
pub fn run_batch<P: Progress + ?Sized>(
    request: &BatchRequest,
    config: &AssignConfig,
    progress: &mut P,
) -> Result<Vec<MaterialReport>, BatchError> {
    let mut loader = FsLoader;

    let paths = expand_selection(&request.selection)?;
    let targets = load_targets(&mut loader, &paths)?;
    if targets.is_empty() {
        return Err(ScanError::EmptySelection.into());
    }

    let texture_dir = match &request.texture_dir {
        Some(dir) => dir.clone(),
        None => default_texture_dir(&paths).ok_or(ScanError::EmptySelection)?,
    };
    let sources = load_sources(&mut loader, &texture_dir)?;

    let placeholder = match (&request.placeholder, config.highlight_missing) {
        (Some(path), true) => Some(loader.load(path)?),
        (None, true) => {
            tracing::warn!("Highlighting missing textures without a placeholder texture");
            None
        }
        (_, false) => None,
    };

    let index = build_index_with_progress(&sources, &config.suffixes, progress)?;
    tracing::info!(
        "Grouped {} textures from '{}' into {} sets",
        sources.len(),
        texture_dir.display(),
        index.len()
    );

    let engine = AssignmentEngine::new(config);
    let reports = engine
        .assign_all_with_progress(&targets, &index, progress)
        .into_iter()
        .map(|(target, outcome)| {
            let mut slots = MaterialSlots::default();
            apply_outcome(&outcome, &mut slots, placeholder.as_ref());
            MaterialReport {
                material: target.handle.clone(),
                name: target.name.clone(),
                status: MatchStatus::from(&outcome),
                slots,
            }
        })
        .collect();
    Ok(reports)
}

/// Folder of the first resolved path; a bare file name resolves to the working directory
pub fn default_texture_dir(paths: &[PathBuf]) -> Option<PathBuf> {
    let parent = paths.first()?.parent()?;
    if parent.as_os_str().is_empty() {
        Some(PathBuf::from("."))
    } else {
        Some(parent.to_path_buf())
    }
}

/// Reset the texture bindings of every selected material, returning the materials touched
pub fn clear_batch(selection: &[PathBuf]) -> Result<Vec<ResourceHandle>, BatchError> {
    let mut loader = FsLoader;
    let paths = expand_selection(selection)?;
    let targets = load_targets(&mut loader, &paths)?;
    if targets.is_empty() {
        return Err(ScanError::EmptySelection.into());
    }

    let mut slots: Vec<MaterialSlots<ResourceHandle>> = targets.iter().map(|_| MaterialSlots::default()).collect();
    clear_all(slots.iter_mut());
    Ok(targets.into_iter().map(|target| target.handle).collect())
}
