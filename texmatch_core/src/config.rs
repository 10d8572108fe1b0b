use std::collections::HashMap;

use crate::error::ConfigError;
use crate::{ChannelKind, ChannelTable};

/// Trailing token carried by every exported texture name
pub const DEFAULT_MARKER: &str = "_$h";

/// Largest edit distance accepted by aggressive assignment unless configured otherwise
pub const DEFAULT_THRESHOLD: usize = 3;

/// Validated channel suffix patterns plus the reverse lookup the grouper needs.
///
/// Patterns are stored lowercase, each is `_<segment><marker>` and no two
/// channels share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixTable {
    marker: String,
    patterns: ChannelTable<String>,
    reverse: HashMap<String, ChannelKind>,
}

impl SuffixTable {
    pub fn new(marker: impl Into<String>, patterns: ChannelTable<String>) -> Result<Self, ConfigError> {
        let marker = marker.into().to_lowercase();
        if marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        let patterns = patterns.map(|_, pattern| pattern.to_lowercase());

        let mut reverse = HashMap::with_capacity(ChannelKind::COUNT);
        for (channel, pattern) in patterns.iter() {
            let stem = pattern
                .strip_suffix(marker.as_str())
                .ok_or_else(|| ConfigError::PatternMissingMarker {
                    channel,
                    pattern: pattern.clone(),
                    marker: marker.clone(),
                })?;
            // the grouper only ever produces `_segment` with no inner underscore
            let reachable = stem.len() > 1
                && stem.starts_with('_')
                && !stem[1..].contains('_');
            if !reachable {
                return Err(ConfigError::UnreachablePattern {
                    channel,
                    pattern: pattern.clone(),
                });
            }
            if let Some(first) = reverse.insert(pattern.clone(), channel) {
                return Err(ConfigError::DuplicatePattern {
                    pattern: pattern.clone(),
                    first,
                    second: channel,
                });
            }
        }

        Ok(Self {
            marker,
            patterns,
            reverse,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn pattern(&self, channel: ChannelKind) -> &str {
        self.patterns.get(channel)
    }

    pub fn patterns(&self) -> &ChannelTable<String> {
        &self.patterns
    }

    /// Reverse lookup of a full suffix token (segment plus marker)
    pub fn channel_for(&self, suffix_token: &str) -> Option<ChannelKind> {
        self.reverse.get(suffix_token).copied()
    }
}

impl Default for SuffixTable {
    fn default() -> Self {
        let patterns = ChannelTable::from_fn(|channel| {
            let segment = match channel {
                ChannelKind::Diffuse => "_b",
                ChannelKind::DiffuseAlpha => "_ba",
                ChannelKind::Normal => "_n",
                ChannelKind::Occlusion => "_o",
                ChannelKind::Metalness => "_m",
                ChannelKind::Roughness => "_r",
                ChannelKind::Emissive => "_e",
            };
            format!("{segment}{DEFAULT_MARKER}")
        });
        Self::new(DEFAULT_MARKER, patterns).unwrap_or_else(|err| unreachable!("{err}"))
    }
}

/// Shader property each channel is written to by default
pub fn default_properties() -> ChannelTable<String> {
    ChannelTable::from_fn(|channel| {
        match channel {
            ChannelKind::Diffuse | ChannelKind::DiffuseAlpha => "_MainTex",
            ChannelKind::Normal => "_BumpMap",
            ChannelKind::Occlusion => "_OcclusionMap",
            ChannelKind::Metalness => "_MetallicGlossMap",
            ChannelKind::Roughness => "_SpecGlossMap",
            ChannelKind::Emissive => "_EmissionMap",
        }
        .to_string()
    })
}

/// Settings of one assignment batch. Immutable while the batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignConfig {
    /// Fall back to fuzzy matching when no exact base identifier exists
    pub aggressive_assign: bool,
    /// Largest accepted edit distance for a fuzzy match
    pub threshold: usize,
    /// Request the placeholder texture on unmatched materials
    pub highlight_missing: bool,
    pub properties: ChannelTable<String>,
    pub suffixes: SuffixTable,
}

impl AssignConfig {
    pub fn property(&self, channel: ChannelKind) -> &str {
        self.properties.get(channel)
    }

    pub fn with_aggressive_assign(mut self, threshold: usize) -> Self {
        self.aggressive_assign = true;
        self.threshold = threshold;
        self
    }

    pub fn with_highlight_missing(mut self, highlight: bool) -> Self {
        self.highlight_missing = highlight;
        self
    }

    pub fn with_suffixes(mut self, suffixes: SuffixTable) -> Self {
        self.suffixes = suffixes;
        self
    }
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            aggressive_assign: false,
            threshold: DEFAULT_THRESHOLD,
            highlight_missing: false,
            properties: default_properties(),
            suffixes: SuffixTable::default(),
        }
    }
}
