/// A texture known to the batch: its raw name plus whatever handle the caller
/// uses to reach the underlying resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceItem<H> {
    pub name: String,
    pub handle: H,
}

impl<H> SourceItem<H> {
    pub fn new(name: impl Into<String>, handle: H) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// A material that receives assignments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetItem<H> {
    pub name: String,
    pub handle: H,
}

impl<H> TargetItem<H> {
    pub fn new(name: impl Into<String>, handle: H) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}
