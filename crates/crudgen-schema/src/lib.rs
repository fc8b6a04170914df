//! Declarative descriptor model for crudgen.
//!
//! This crate holds the static description of a cloud API resource — URLs,
//! verbs, identity, import formats, state-schema history, and lifecycle
//! flags — exactly as the configuration loader deserialized it. No
//! resolution or defaulting happens here; that is `crudgen-core`'s job.

pub mod field;
pub mod http;
pub mod nested_query;
pub mod resource;
pub mod timeouts;
pub mod virtual_field;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        field::{Field, FieldKind, FieldList},
        http::HttpVerb,
        nested_query::NestedQuery,
        resource::{IamPolicy, Resource},
        timeouts::Timeouts,
        virtual_field::{VirtualField, VirtualFieldKind},
    };
    pub use serde::{Deserialize, Serialize};
}
