use thiserror::Error;

use crate::ChannelKind;

/// Errors raised while building a [`crate::ChannelTable`] or [`crate::SuffixTable`]
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum ConfigError {
    #[error("No entry was provided for the {0} channel")]
    MissingChannel(ChannelKind),

    #[error("The {0} channel was given more than one entry")]
    DuplicateChannel(ChannelKind),

    #[error("Unknown channel `{0}`")]
    UnknownChannel(String),

    #[error("Marker token must not be empty")]
    EmptyMarker,

    #[error("Suffix pattern `{pattern}` of the {channel} channel does not end with marker `{marker}`")]
    PatternMissingMarker {
        channel: ChannelKind,
        pattern: String,
        marker: String,
    },

    #[error("Suffix pattern `{pattern}` of the {channel} channel can never match a single `_segment`")]
    UnreachablePattern {
        channel: ChannelKind,
        pattern: String,
    },

    #[error("Suffix pattern `{pattern}` is shared by the {first} and {second} channels")]
    DuplicatePattern {
        pattern: String,
        first: ChannelKind,
        second: ChannelKind,
    },
}

/// Two source items claim the same channel of the same base identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
#[error("`{incoming}` and `{existing}` both claim the {channel} channel of `{base}`")]
pub struct ConflictError {
    pub base: String,
    pub channel: ChannelKind,
    /// Identifier of the source item already holding the channel
    pub existing: String,
    /// Identifier of the source item that tried to claim it
    pub incoming: String,
}
