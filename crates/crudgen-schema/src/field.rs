use crate::prelude::*;
use derive_more::{Deref, IntoIterator};

///
/// FieldList
///
/// Ordered sequence of typed field descriptors. Declaration order is
/// significant and preserved through (de)serialization.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, IntoIterator, Serialize)]
pub struct FieldList(#[into_iterator(owned, ref)] Vec<Field>);

impl FieldList {
    #[must_use]
    pub const fn new(fields: Vec<Field>) -> Self {
        Self(fields)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.name.as_str())
    }
}

///
/// Field
///
/// A single property or parameter. The resolver only performs name
/// lookups against these; the full shape of the type belongs to the
/// emission layer.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,

    #[serde(default)]
    pub required: bool,

    /// Value is produced by the API and never sent on writes.
    #[serde(default)]
    pub output: bool,

    /// Field parameterizes URLs but is absent from the request body.
    #[serde(default)]
    pub url_param_only: bool,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            output: false,
            url_param_only: false,
        }
    }
}

///
/// FieldKind
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FieldKind {
    Array,
    Boolean,
    Double,
    Enum,
    Integer,
    KeyValuePairs,
    NestedObject,
    String,
    Time,
}
