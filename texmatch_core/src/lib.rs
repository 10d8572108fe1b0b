//! Matches exported textures to the materials they belong to by name.
//!
//! Texture names are grouped into per-channel sets under a shared base
//! identifier ([`build_index`]); each material name is then normalized and
//! looked up, falling back to Damerau–Levenshtein matching when enabled
//! ([`AssignmentEngine`]). Nothing here touches the file system.

mod assign;
mod channel;
mod config;
mod distance;
pub mod error;
mod fuzzy;
mod group;
mod item;
mod normalize;
mod progress;

pub use assign::{Assignment, AssignmentEngine, FallbackRequest, MatchOutcome, assign_all};
pub use channel::{ChannelKind, ChannelTable};
pub use config::{AssignConfig, DEFAULT_MARKER, DEFAULT_THRESHOLD, SuffixTable, default_properties};
pub use distance::damerau_levenshtein;
pub use error::{ConfigError, ConflictError};
pub use fuzzy::{ClosestMatch, DamerauLevenshtein, Matcher, closest};
pub use group::{ChannelSet, GroupIndex, build_index, build_index_with_progress, split_channel};
pub use item::{SourceItem, TargetItem};
pub use normalize::{normalize_source, normalize_target};
pub use progress::{ChannelProgress, NoProgress, Progress, ProgressEvent, TraceProgress};
