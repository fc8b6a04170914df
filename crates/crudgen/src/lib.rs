//! ## Crate layout
//! - `schema`: the declarative descriptor model, as deserialized from
//!   configuration by an external loader.
//! - `core`: the resolution engine that compiles descriptors into
//!   validated lifecycle plans.
//!
//! The `prelude` mirrors the surface an emitter needs: descriptor types
//! in, resolved plan (or the full violation listing) out. Resolution is
//! pure, so callers may resolve many resources in parallel and isolate
//! per-resource failures by composition.

pub use crudgen_core as core;
pub use crudgen_schema as schema;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crudgen_core::{
    error::ErrorSet,
    resolve::{ResolvedPlan, resolve},
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        error::{
            ErrorOrigin, ErrorSet, ResolveError, ResolveWarning, TokenContext, UrlKind, Violation,
        },
        resolve::{
            IdentityPlan, ImportMatcher, LifecyclePolicy, ResolvedPlan, StatePlan, UrlPlan,
            resolve,
        },
        template::{Segment, Template},
    };
    pub use crate::schema::prelude::*;
}
