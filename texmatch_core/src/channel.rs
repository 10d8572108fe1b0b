use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::error::ConfigError;

/// Semantic role a texture plays on a material.
///
/// Declaration order is the order assignments are emitted in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelKind {
    Diffuse,
    DiffuseAlpha,
    Normal,
    Occlusion,
    Metalness,
    Roughness,
    Emissive,
}

impl ChannelKind {
    pub const COUNT: usize = 7;

    pub const ALL: [ChannelKind; Self::COUNT] = [
        ChannelKind::Diffuse,
        ChannelKind::DiffuseAlpha,
        ChannelKind::Normal,
        ChannelKind::Occlusion,
        ChannelKind::Metalness,
        ChannelKind::Roughness,
        ChannelKind::Emissive,
    ];

    /// Position of the variant in [`ChannelKind::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ChannelKind::Diffuse => "diffuse",
            ChannelKind::DiffuseAlpha => "diffuse_alpha",
            ChannelKind::Normal => "normal",
            ChannelKind::Occlusion => "occlusion",
            ChannelKind::Metalness => "metalness",
            ChannelKind::Roughness => "roughness",
            ChannelKind::Emissive => "emissive",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "diffuse" => Ok(ChannelKind::Diffuse),
            "diffuse_alpha" | "diffusealpha" => Ok(ChannelKind::DiffuseAlpha),
            "normal" => Ok(ChannelKind::Normal),
            "occlusion" => Ok(ChannelKind::Occlusion),
            "metalness" => Ok(ChannelKind::Metalness),
            "roughness" => Ok(ChannelKind::Roughness),
            "emissive" => Ok(ChannelKind::Emissive),
            _ => Err(ConfigError::UnknownChannel(s.to_string())),
        }
    }
}

/// Table holding exactly one `T` per [`ChannelKind`].
///
/// Every constructor is total over the variant set, so lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelTable<T> {
    entries: [T; ChannelKind::COUNT],
}

impl<T> ChannelTable<T> {
    pub fn from_fn<F: FnMut(ChannelKind) -> T>(mut func: F) -> Self {
        Self {
            entries: std::array::from_fn(|index| func(ChannelKind::ALL[index])),
        }
    }

    /// Builds a table from `(channel, value)` pairs, rejecting missing or repeated channels
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (ChannelKind, T)>,
    {
        let mut slots: [Option<T>; ChannelKind::COUNT] = std::array::from_fn(|_| None);
        for (channel, value) in pairs {
            if slots[channel.index()].replace(value).is_some() {
                return Err(ConfigError::DuplicateChannel(channel));
            }
        }
        if let Some(missing) = ChannelKind::ALL
            .into_iter()
            .find(|channel| slots[channel.index()].is_none())
        {
            return Err(ConfigError::MissingChannel(missing));
        }
        Ok(Self {
            entries: slots.map(|slot| slot.unwrap_or_else(|| unreachable!("checked above"))),
        })
    }

    pub fn get(&self, channel: ChannelKind) -> &T {
        &self.entries[channel.index()]
    }

    /// Replace the entry of `channel`, returning the previous one
    pub fn set(&mut self, channel: ChannelKind, value: T) -> T {
        std::mem::replace(&mut self.entries[channel.index()], value)
    }

    /// Iterate in [`ChannelKind`] declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ChannelKind, &T)> {
        ChannelKind::ALL.into_iter().zip(self.entries.iter())
    }

    pub fn map<U, F: FnMut(ChannelKind, &T) -> U>(&self, mut func: F) -> ChannelTable<U> {
        ChannelTable::from_fn(|channel| func(channel, self.get(channel)))
    }
}

impl<T> Index<ChannelKind> for ChannelTable<T> {
    type Output = T;

    fn index(&self, channel: ChannelKind) -> &T {
        self.get(channel)
    }
}
