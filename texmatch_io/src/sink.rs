use std::collections::BTreeMap;

use derivative::Derivative;
use texmatch_core::MatchOutcome;

/// A material that texture bindings can be written to
pub trait MaterialSink {
    type Texture;

    fn set_texture(&mut self, property: &str, texture: Self::Texture);

    /// Drop every texture binding, returning the material to its defaults
    fn clear_textures(&mut self);
}

/// In-memory material: property name to bound texture
#[derive(Derivative)]
#[derivative(
    Debug(bound = "H: std::fmt::Debug"),
    Clone(bound = "H: Clone"),
    PartialEq(bound = "H: PartialEq"),
    Default(bound = "")
)]
pub struct MaterialSlots<H> {
    bindings: BTreeMap<String, H>,
}

impl<H> MaterialSlots<H> {
    pub fn get(&self, property: &str) -> Option<&H> {
        self.bindings.get(property)
    }

    /// Bindings sorted by property name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.bindings.iter().map(|(property, texture)| (property.as_str(), texture))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<H> MaterialSink for MaterialSlots<H> {
    type Texture = H;

    fn set_texture(&mut self, property: &str, texture: H) {
        self.bindings.insert(property.to_string(), texture);
    }

    fn clear_textures(&mut self) {
        self.bindings.clear();
    }
}

/// Write an outcome onto `sink`, returning how many bindings were set.
///
/// Assignments are written in order, so when two channels share a property
/// the later channel wins. A fallback request is honoured only with a placeholder.
pub fn apply_outcome<S, T, K>(outcome: &MatchOutcome<'_, S, T>, sink: &mut K, placeholder: Option<&S>) -> usize
where
    S: Clone,
    K: MaterialSink<Texture = S> + ?Sized,
{
    match outcome {
        MatchOutcome::AssignedExact(assignments) | MatchOutcome::AssignedFuzzy { assignments, .. } => {
            for assignment in assignments {
                sink.set_texture(assignment.property, assignment.source.handle.clone());
            }
            assignments.len()
        }
        MatchOutcome::Unmatched {
            fallback: Some(request),
        } => match placeholder {
            Some(texture) => {
                sink.set_texture(request.property, texture.clone());
                1
            }
            None => {
                tracing::warn!("Missing texture highlight requested without a placeholder texture");
                0
            }
        },
        MatchOutcome::Unmatched { fallback: None } => 0,
    }
}

/// Reset every material in `sinks`
pub fn clear_all<'a, K, I>(sinks: I)
where
    K: MaterialSink + 'a + ?Sized,
    I: IntoIterator<Item = &'a mut K>,
{
    let mut cleared = 0usize;
    for sink in sinks {
        sink.clear_textures();
        cleared += 1;
    }
    tracing::debug!("Cleared textures off {cleared} materials");
}
