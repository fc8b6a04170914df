use crate::error::ResolveError;
use crudgen_schema::{resource::Resource, timeouts::Timeouts};
use serde::Serialize;

///
/// LifecyclePolicy
///
/// Per-resource CRUD policy consumed by the emission layer: which
/// operations are active, how create failures are handled, and which
/// externally-defined hooks the generated client wires in. Predicate and
/// hook names are opaque identifiers resolved by the emitter's capability
/// lookup; they are never invoked here.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LifecyclePolicy {
    pub skip_read: bool,
    pub skip_delete: bool,
    pub immutable: bool,
    pub readonly: bool,
    pub update_mask: bool,
    pub exclude_resource: bool,
    pub exclude_import: bool,
    pub autogen_async: bool,
    pub taint_resource_on_failed_create: bool,
    pub legacy_long_form_project: bool,
    pub supports_indirect_user_project_override: bool,
    pub error_retry_predicates: Vec<String>,
    pub error_abort_predicates: Vec<String>,
    pub custom_diff: Vec<String>,
    pub timeouts: Timeouts,
    pub migrate_state: Option<String>,
    pub read_error_transform: Option<String>,
    pub deprecation_message: Option<String>,
}

/// Merge the per-operation flags, predicate lists, and timeouts into one
/// policy record.
pub(crate) fn assemble_policy(resource: &Resource) -> Result<LifecyclePolicy, Vec<ResolveError>> {
    let mut errors = Vec::new();

    if resource.exclude_resource && resource.iam_policy.is_none() {
        errors.push(ResolveError::ConflictingOverride {
            message: "exclude_resource generates only the IAM artifact, which requires an iam_policy block"
                .to_string(),
        });
    }

    if resource.immutable && resource.update_url.is_some() {
        errors.push(ResolveError::ConflictingOverride {
            message: "immutable resources cannot declare an update_url override".to_string(),
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LifecyclePolicy {
        skip_read: resource.skip_read,
        skip_delete: resource.skip_delete,
        immutable: resource.immutable,
        readonly: resource.readonly,
        update_mask: resource.update_mask,
        exclude_resource: resource.exclude_resource,
        exclude_import: resource.exclude_import,
        autogen_async: resource.autogen_async,
        taint_resource_on_failed_create: resource.taint_resource_on_failed_create,
        legacy_long_form_project: resource.legacy_long_form_project,
        supports_indirect_user_project_override: resource.supports_indirect_user_project_override,
        error_retry_predicates: resource.error_retry_predicates.clone(),
        error_abort_predicates: resource.error_abort_predicates.clone(),
        custom_diff: resource.custom_diff.clone(),
        timeouts: resource.timeouts.unwrap_or_default(),
        migrate_state: resource.migrate_state.clone(),
        read_error_transform: resource.read_error_transform.clone(),
        deprecation_message: resource.deprecation_message.clone(),
    })
}
