//! File-system side of texture assignment: finding textures and materials,
//! turning them into items for [`texmatch_core`], and writing the outcome back.

mod batch;
pub mod error;
mod loader;
mod scan;
mod sink;

pub use batch::{BatchRequest, MatchStatus, MaterialReport, clear_batch, default_texture_dir, run_batch};
pub use error::{BatchError, ScanError};
pub use loader::{FsLoader, ResourceHandle, ResourceLoader, load_sources, load_targets};
pub use scan::{FileEntry, ResourceKind, enumerate, expand_selection};
pub use sink::{MaterialSink, MaterialSlots, apply_outcome, clear_all};
