use crate::prelude::*;

///
/// VirtualField
///
/// A client-only field that exists on managed state but never on the API
/// payload. Virtual fields participate in identity and URL templates by
/// name; everything else about them is passed through to the emitter
/// opaquely.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VirtualField {
    pub name: String,

    #[serde(default)]
    pub kind: VirtualFieldKind,

    /// Initial value is read back from the API after create.
    #[serde(default)]
    pub default_from_api: bool,
}

impl VirtualField {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: VirtualFieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_from_api: false,
        }
    }
}

///
/// VirtualFieldKind
///
/// Closed set of shapes a virtual field may take.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum VirtualFieldKind {
    #[default]
    Boolean,
    String,
}
