use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use derivative::Derivative;

use crate::error::ConflictError;
use crate::normalize::normalize_source;
use crate::progress::{NoProgress, Progress, fraction};
use crate::{ChannelKind, SourceItem, SuffixTable};

/// The textures of one base identifier, at most one per channel.
#[derive(Derivative)]
#[derivative(Debug(bound = "H: std::fmt::Debug"), Clone(bound = ""))]
pub struct ChannelSet<'a, H> {
    slots: [Option<&'a SourceItem<H>>; ChannelKind::COUNT],
}

impl<'a, H> Default for ChannelSet<'a, H> {
    fn default() -> Self {
        Self {
            slots: [None; ChannelKind::COUNT],
        }
    }
}

impl<'a, H> ChannelSet<'a, H> {
    pub fn get(&self, channel: ChannelKind) -> Option<&'a SourceItem<H>> {
        self.slots[channel.index()]
    }

    pub fn contains(&self, channel: ChannelKind) -> bool {
        self.slots[channel.index()].is_some()
    }

    /// Occupied channels in [`ChannelKind`] declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ChannelKind, &'a SourceItem<H>)> + '_ {
        ChannelKind::ALL
            .into_iter()
            .filter_map(|channel| self.get(channel).map(|source| (channel, source)))
    }

    pub fn channels(&self) -> impl Iterator<Item = ChannelKind> + '_ {
        self.iter().map(|(channel, _)| channel)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Claim `channel` for `source`, handing back the current holder if already taken
    fn claim(
        &mut self,
        channel: ChannelKind,
        source: &'a SourceItem<H>,
    ) -> Result<(), &'a SourceItem<H>> {
        match self.slots[channel.index()] {
            Some(existing) => Err(existing),
            None => {
                self.slots[channel.index()] = Some(source);
                Ok(())
            }
        }
    }
}

/// Base identifier to [`ChannelSet`] for one batch. Keys iterate lexicographically.
#[derive(Derivative)]
#[derivative(Debug(bound = "H: std::fmt::Debug"), Clone(bound = ""), Default(bound = ""))]
pub struct GroupIndex<'a, H> {
    groups: BTreeMap<String, ChannelSet<'a, H>>,
    ignored: usize,
}

impl<'a, H> GroupIndex<'a, H> {
    /// Exact lookup of a base identifier
    pub fn get(&self, base: &str) -> Option<&ChannelSet<'a, H>> {
        self.groups.get(base)
    }

    pub fn contains(&self, base: &str) -> bool {
        self.groups.contains_key(base)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChannelSet<'a, H>)> {
        self.groups.iter().map(|(base, set)| (base.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sources that carried no recognisable channel suffix
    pub fn ignored(&self) -> usize {
        self.ignored
    }
}

/// Split a normalized identifier into its base and channel.
///
/// `None` when there is no non-empty base before the last `_`, or when the
/// suffix is not a configured pattern.
pub fn split_channel<'i>(identifier: &'i str, suffixes: &SuffixTable) -> Option<(&'i str, ChannelKind)> {
    let last = identifier.rfind('_')?;
    if last == 0 {
        return None;
    }
    let (base, suffix) = identifier.split_at(last);
    let token = format!("{suffix}{}", suffixes.marker());
    suffixes.channel_for(&token).map(|channel| (base, channel))
}

/// Group every source by base identifier.
///
/// Fails on the first channel claimed twice under one base; no partial index is returned.
pub fn build_index<'a, H>(
    sources: &'a [SourceItem<H>],
    suffixes: &SuffixTable,
) -> Result<GroupIndex<'a, H>, ConflictError> {
    build_index_with_progress(sources, suffixes, &mut NoProgress)
}

pub fn build_index_with_progress<'a, H, P: Progress + ?Sized>(
    sources: &'a [SourceItem<H>],
    suffixes: &SuffixTable,
    progress: &mut P,
) -> Result<GroupIndex<'a, H>, ConflictError> {
    let mut index = GroupIndex::default();
    let total = sources.len();

    for (done, source) in sources.iter().enumerate() {
        progress.report(
            fraction(done, total),
            &format!("Grouping textures ... {done} / {total}"),
        );

        let identifier = normalize_source(&source.name, suffixes.marker());
        let Some((base, channel)) = split_channel(&identifier, suffixes) else {
            tracing::debug!("Ignoring texture `{}`: no channel suffix", source.name);
            index.ignored += 1;
            continue;
        };

        let set = match index.groups.entry(base.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(ChannelSet::default()),
        };
        set.claim(channel, source).map_err(|existing| ConflictError {
            base: base.to_string(),
            channel,
            existing: existing.name.clone(),
            incoming: source.name.clone(),
        })?;
    }

    progress.report(1.0, "Grouping textures ... done");
    tracing::debug!(
        "Grouped {} textures into {} base identifiers ({} ignored)",
        total - index.ignored,
        index.groups.len(),
        index.ignored
    );
    Ok(index)
}
