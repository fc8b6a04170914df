use crate::error::{ResolveError, ResolveWarning};
use crudgen_schema::resource::Resource;
use serde::Serialize;

///
/// StatePlan
///
/// Resolved state-schema history: which persisted-state versions need a
/// generated upgrade step to reach the current schema version.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StatePlan {
    pub schema_version: u32,
    pub effective_base_version: u32,
    pub upgrade_versions: Vec<u32>,
}

/// Resolve the state-schema version window.
pub(crate) fn resolve_state_schema(
    resource: &Resource,
    warnings: &mut Vec<ResolveWarning>,
) -> Result<StatePlan, Vec<ResolveError>> {
    let mut errors = Vec::new();

    let schema_version = resource.schema_version;
    let effective_base_version = resource.state_upgrade_base_schema_version.unwrap_or(0);

    if schema_version < effective_base_version {
        errors.push(ResolveError::InvalidStateVersionRange {
            base: effective_base_version,
            schema: schema_version,
        });
    }

    if resource.migrate_state.is_some() && resource.state_upgraders {
        errors.push(ResolveError::ConflictingOverride {
            message: "migrate_state and state_upgraders are mutually exclusive migration mechanisms"
                .to_string(),
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Explicit opt-out wins regardless of version numbers.
    let upgrade_versions: Vec<u32> = if resource.state_upgraders {
        (effective_base_version + 1..=schema_version).collect()
    } else {
        Vec::new()
    };

    if resource.state_upgraders && upgrade_versions.is_empty() {
        warnings.push(ResolveWarning::EmptyUpgradeWindow {
            schema: schema_version,
        });
    }

    Ok(StatePlan {
        schema_version,
        effective_base_version,
        upgrade_versions,
    })
}
