//! Descriptor resolution: compiles a declarative [`Resource`] into an
//! immutable, validated [`ResolvedPlan`].
//!
//! Determinism: resolution is pure and single-threaded. The same
//! descriptor always yields an identical plan or an identical error set;
//! sub-resolver errors are concatenated in a fixed origin order (url,
//! identity, state, mutex, policy).

pub mod identity;
pub mod policy;
pub mod state;
pub mod url;

mod mutex;

#[cfg(test)]
mod tests;

use crate::{
    error::{ErrorOrigin, ErrorSet, ResolveError, ResolveWarning},
    template::Template,
};
use crudgen_schema::resource::Resource;
use serde::Serialize;

pub use identity::{IdentityPlan, ImportMatcher};
pub use policy::LifecyclePolicy;
pub use state::StatePlan;
pub use url::UrlPlan;

///
/// ResolvedPlan
///
/// The fully-defaulted, validated output of a resolution pass, ready for
/// code emission. Immutable; a failing descriptor never produces one.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResolvedPlan {
    pub urls: UrlPlan,
    pub identity: IdentityPlan,
    pub state: StatePlan,
    pub mutex: Option<Template>,
    pub policy: LifecyclePolicy,
    pub warnings: Vec<ResolveWarning>,
}

/// Resolve a descriptor into a plan, or the full set of violations.
///
/// Every independent sub-resolver runs to completion so a configuration
/// author sees all problems in one pass. The mutex check is the one
/// dependent step: it needs the compiled identity, and is skipped when
/// identity compilation failed — its verdicts against an unknown identity
/// would be noise.
pub fn resolve(resource: &Resource) -> Result<ResolvedPlan, ErrorSet> {
    let mut errs = ErrorSet::new();
    let mut warnings = Vec::new();

    let urls = collect(ErrorOrigin::Url, url::resolve_urls(resource), &mut errs);
    let identity = collect(
        ErrorOrigin::Identity,
        identity::compile_identity(resource),
        &mut errs,
    );
    let state = collect(
        ErrorOrigin::State,
        state::resolve_state_schema(resource, &mut warnings),
        &mut errs,
    );

    let mutex = match &identity {
        Some(identity) => collect(
            ErrorOrigin::Mutex,
            mutex::resolve_mutex(resource, identity),
            &mut errs,
        ),
        None => None,
    };

    let policy = collect(
        ErrorOrigin::Policy,
        policy::assemble_policy(resource),
        &mut errs,
    );

    match (urls, identity, state, mutex, policy) {
        (Some(urls), Some(identity), Some(state), Some(mutex), Some(policy))
            if errs.is_empty() =>
        {
            Ok(ResolvedPlan {
                urls,
                identity,
                state,
                mutex,
                policy,
                warnings,
            })
        }
        _ => Err(errs),
    }
}

// Fold one sub-resolver result into the shared error set.
fn collect<T>(
    origin: ErrorOrigin,
    result: Result<T, Vec<ResolveError>>,
    errs: &mut ErrorSet,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(errors) => {
            for error in errors {
                errs.push(origin, error);
            }
            None
        }
    }
}
