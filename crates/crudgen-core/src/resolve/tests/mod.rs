use super::{ResolvedPlan, resolve};
use crate::error::{
    ErrorOrigin, ErrorSet, ResolveError, ResolveWarning, TokenContext, UrlKind,
};
use crudgen_schema::prelude::*;


const BASE_URL: &str = "projects/{{project}}/things";
const SELF_LINK: &str = "projects/{{project}}/things/{{name}}";

// A descriptor with enough declared fields to exercise every resolver.
fn thing() -> Resource {
    let mut resource = Resource::new("Thing", BASE_URL);
    resource.properties = FieldList::new(vec![
        Field::new("name", FieldKind::String),
        Field::new("description", FieldKind::String),
    ]);
    resource.parameters = FieldList::new(vec![
        Field::new("region", FieldKind::String),
        Field::new("parent", FieldKind::String),
    ]);
    resource
}

fn origins(errs: &ErrorSet) -> Vec<ErrorOrigin> {
    errs.violations().iter().map(|v| v.origin).collect()
}

// Re-resolve a plan's equivalent fully-explicit descriptor.
fn materialize(resource: &Resource, plan: &ResolvedPlan) -> Resource {
    let mut explicit = resource.clone();
    explicit.self_link = Some(plan.urls.self_link.clone());
    explicit.create_url = Some(plan.urls.create_url.clone());
    explicit.update_url = Some(plan.urls.update_url.clone());
    explicit.delete_url = Some(plan.urls.delete_url.clone());
    explicit.read_query_params = Some(plan.urls.read_query_params.clone());
    explicit.collection_url_key = Some(plan.urls.collection_url_key.clone());
    explicit.identity = plan.identity.fields.clone();
    explicit.id_format = Some(plan.identity.id_format.source().to_string());
    explicit.import_format = plan
        .identity
        .import
        .iter()
        .map(|m| m.template().source().to_string())
        .collect();
    explicit.state_upgrade_base_schema_version = Some(plan.state.effective_base_version);
    explicit.timeouts = Some(plan.policy.timeouts);
    explicit
}

//
// URL resolution
//

#[test]
fn post_create_defaults_every_url_to_base() {
    let plan = resolve(&thing()).unwrap();

    assert_eq!(plan.urls.self_link, BASE_URL);
    assert_eq!(plan.urls.create_url, BASE_URL);
    assert_eq!(plan.urls.update_url, BASE_URL);
    assert_eq!(plan.urls.delete_url, BASE_URL);
    assert_eq!(plan.urls.read_query_params, "");
}

#[test]
fn put_create_without_self_link_is_unresolvable() {
    let mut resource = thing();
    resource.create_verb = HttpVerb::Put;

    let errs = resolve(&resource).unwrap_err();
    assert_eq!(errs.len(), 1);

    let violation = &errs.violations()[0];
    assert_eq!(violation.origin, ErrorOrigin::Url);
    assert!(matches!(
        violation.error,
        ResolveError::UnresolvableUrl {
            url: UrlKind::SelfLink,
            ..
        }
    ));
}

#[test]
fn put_create_defaults_create_url_to_self_link() {
    let mut resource = thing();
    resource.create_verb = HttpVerb::Put;
    resource.self_link = Some(SELF_LINK.to_string());

    let plan = resolve(&resource).unwrap();
    assert_eq!(plan.urls.self_link, SELF_LINK);
    assert_eq!(plan.urls.create_url, SELF_LINK);
    assert_eq!(plan.urls.update_url, SELF_LINK);
    assert_eq!(plan.urls.delete_url, SELF_LINK);
}

#[test]
fn update_and_delete_urls_default_independently() {
    let mut resource = thing();
    resource.update_url = Some("projects/{{project}}/things/{{name}}/setLabels".to_string());

    let plan = resolve(&resource).unwrap();
    assert_eq!(
        plan.urls.update_url,
        "projects/{{project}}/things/{{name}}/setLabels"
    );
    assert_eq!(plan.urls.delete_url, BASE_URL);
}

#[test]
fn read_query_params_pass_through() {
    let mut resource = thing();
    resource.read_query_params = Some("?view=FULL".to_string());

    let plan = resolve(&resource).unwrap();
    assert_eq!(plan.urls.read_query_params, "?view=FULL");
}

#[test]
fn collection_url_key_defaults_to_camel_plural() {
    let plan = resolve(&thing()).unwrap();
    assert_eq!(plan.urls.collection_url_key, "things");

    let mut resource = thing();
    resource.name = "TargetProxy".to_string();
    let plan = resolve(&resource).unwrap();
    assert_eq!(plan.urls.collection_url_key, "targetProxies");
}

#[test]
fn explicit_collection_url_key_wins() {
    let mut resource = thing();
    resource.collection_url_key = Some("items".to_string());

    let plan = resolve(&resource).unwrap();
    assert_eq!(plan.urls.collection_url_key, "items");
}

#[test]
fn non_creation_verb_is_a_conflict() {
    let mut resource = thing();
    resource.create_verb = HttpVerb::Get;

    let errs = resolve(&resource).unwrap_err();
    let violation = &errs.violations()[0];
    assert_eq!(violation.origin, ErrorOrigin::Url);
    assert!(matches!(
        violation.error,
        ResolveError::ConflictingOverride { .. }
    ));
}

#[test]
fn skip_flags_still_resolve_urls() {
    let mut resource = thing();
    resource.skip_read = true;
    resource.skip_delete = true;

    let plan = resolve(&resource).unwrap();
    assert_eq!(plan.urls.delete_url, BASE_URL);
    assert!(plan.policy.skip_read);
    assert!(plan.policy.skip_delete);
}

//
// Identity & import compilation
//

#[test]
fn empty_identity_falls_back_to_name() {
    let plan = resolve(&thing()).unwrap();

    assert_eq!(plan.identity.fields, vec!["name"]);
    assert_eq!(plan.identity.id_format.source(), "{{name}}");
    assert_eq!(plan.identity.import.len(), 1);
    assert_eq!(plan.identity.import[0].template().source(), "{{name}}");
}

#[test]
fn explicit_identity_preserves_declared_order() {
    let mut resource = thing();
    resource.identity = vec!["region".to_string(), "name".to_string()];

    let plan = resolve(&resource).unwrap();
    assert_eq!(plan.identity.fields, vec!["region", "name"]);
    assert_eq!(plan.identity.id_format.source(), "{{region}}/{{name}}");
}

#[test]
fn undeclared_identity_field_is_rejected() {
    let mut resource = thing();
    resource.identity = vec!["zone".to_string(), "name".to_string()];

    let errs = resolve(&resource).unwrap_err();
    let violation = &errs.violations()[0];
    assert_eq!(violation.origin, ErrorOrigin::Identity);
    assert!(matches!(
        &violation.error,
        ResolveError::UnknownIdentityToken { token, context: TokenContext::Identity }
            if token == "zone"
    ));
}

#[test]
fn virtual_fields_satisfy_identity_lookup() {
    let mut resource = thing();
    resource.virtual_fields = vec![VirtualField::new("instance", VirtualFieldKind::String)];
    resource.identity = vec!["instance".to_string(), "name".to_string()];

    assert!(resolve(&resource).is_ok());
}

#[test]
fn import_format_tokens_must_match_identity() {
    let mut resource = thing();
    resource.identity = vec!["region".to_string(), "name".to_string()];
    resource.import_format = vec!["{{region}}/{{name}}".to_string()];
    assert!(resolve(&resource).is_ok());

    let mut resource = thing();
    resource.identity = vec!["region".to_string(), "name".to_string()];
    resource.import_format = vec!["{{zone}}/{{name}}".to_string()];

    let errs = resolve(&resource).unwrap_err();
    let violation = &errs.violations()[0];
    assert!(matches!(
        &violation.error,
        ResolveError::UnknownIdentityToken { token, context: TokenContext::ImportFormat { index: 0 } }
            if token == "zone"
    ));
}

#[test]
fn import_matchers_preserve_declaration_order() {
    let mut resource = thing();
    resource.identity = vec!["region".to_string(), "name".to_string()];
    resource.import_format = vec![
        "projects/{{region}}/things/{{name}}".to_string(),
        "{{region}}/{{name}}".to_string(),
    ];

    let plan = resolve(&resource).unwrap();
    let sources: Vec<_> = plan
        .identity
        .import
        .iter()
        .map(|m| m.template().source())
        .collect();
    assert_eq!(
        sources,
        vec!["projects/{{region}}/things/{{name}}", "{{region}}/{{name}}"]
    );
}

#[test]
fn greedy_import_token_spans_separators() {
    let mut resource = thing();
    resource.identity = vec!["parent".to_string(), "name".to_string()];
    resource.import_format = vec!["{{%parent}}/things/{{name}}".to_string()];

    let plan = resolve(&resource).unwrap();
    let captures = plan.identity.import[0]
        .matches("folders/123/prod/things/web")
        .unwrap();
    assert_eq!(captures["parent"], "folders/123/prod");
    assert_eq!(captures["name"], "web");

    assert!(plan.identity.import[0].matches("things/web/extra").is_none());
}

#[test]
fn greedy_tokens_are_rejected_in_id_format() {
    let mut resource = thing();
    resource.identity = vec!["parent".to_string(), "name".to_string()];
    resource.id_format = Some("{{%parent}}/{{name}}".to_string());

    let errs = resolve(&resource).unwrap_err();
    assert!(matches!(
        errs.violations()[0].error,
        ResolveError::MalformedTemplate {
            context: TokenContext::IdFormat,
            ..
        }
    ));
}

#[test]
fn exclude_import_keeps_id_format_validation() {
    let mut resource = thing();
    resource.exclude_import = true;
    resource.id_format = Some("{{zone}}".to_string());
    assert!(resolve(&resource).is_err());

    let mut resource = thing();
    resource.exclude_import = true;
    let plan = resolve(&resource).unwrap();
    assert!(plan.identity.import.is_empty());
    assert!(plan.policy.exclude_import);
}

#[test]
fn unterminated_template_is_malformed() {
    let mut resource = thing();
    resource.id_format = Some("things/{{name".to_string());

    let errs = resolve(&resource).unwrap_err();
    assert!(matches!(
        errs.violations()[0].error,
        ResolveError::MalformedTemplate {
            context: TokenContext::IdFormat,
            ..
        }
    ));
}

#[test]
fn nested_query_requires_explicit_identity() {
    let mut resource = thing();
    resource.nested_query = Some(NestedQuery {
        keys: vec!["items".to_string()],
        ..NestedQuery::default()
    });

    let errs = resolve(&resource).unwrap_err();
    let violation = &errs.violations()[0];
    assert_eq!(violation.origin, ErrorOrigin::Identity);
    assert!(matches!(
        violation.error,
        ResolveError::ConflictingOverride { .. }
    ));

    let mut resource = thing();
    resource.nested_query = Some(NestedQuery::default());
    resource.identity = vec!["region".to_string(), "name".to_string()];
    assert!(resolve(&resource).is_ok());
}

//
// State schema tracking
//

#[test]
fn upgrade_window_spans_base_to_schema_version() {
    let mut resource = thing();
    resource.schema_version = 3;
    resource.state_upgrade_base_schema_version = Some(1);
    resource.state_upgraders = true;

    let plan = resolve(&resource).unwrap();
    assert_eq!(plan.state.effective_base_version, 1);
    assert_eq!(plan.state.upgrade_versions, vec![2, 3]);
    assert!(plan.warnings.is_empty());
}

#[test]
fn upgrader_opt_out_wins_over_versions() {
    let mut resource = thing();
    resource.schema_version = 3;
    resource.state_upgrade_base_schema_version = Some(1);
    resource.state_upgraders = false;

    let plan = resolve(&resource).unwrap();
    assert!(plan.state.upgrade_versions.is_empty());
    assert!(plan.warnings.is_empty());
}

#[test]
fn base_version_above_schema_version_is_invalid() {
    let mut resource = thing();
    resource.schema_version = 1;
    resource.state_upgrade_base_schema_version = Some(2);

    let errs = resolve(&resource).unwrap_err();
    let violation = &errs.violations()[0];
    assert_eq!(violation.origin, ErrorOrigin::State);
    assert!(matches!(
        violation.error,
        ResolveError::InvalidStateVersionRange { base: 2, schema: 1 }
    ));
}

#[test]
fn empty_upgrade_window_warns_instead_of_failing() {
    let mut resource = thing();
    resource.state_upgraders = true;

    let plan = resolve(&resource).unwrap();
    assert!(plan.state.upgrade_versions.is_empty());
    assert_eq!(
        plan.warnings,
        vec![ResolveWarning::EmptyUpgradeWindow { schema: 0 }]
    );
}

#[test]
fn migrate_state_conflicts_with_upgraders() {
    let mut resource = thing();
    resource.state_upgraders = true;
    resource.migrate_state = Some("resourceThingMigrateState".to_string());

    let errs = resolve(&resource).unwrap_err();
    let violation = &errs.violations()[0];
    assert_eq!(violation.origin, ErrorOrigin::State);
    assert!(matches!(
        violation.error,
        ResolveError::ConflictingOverride { .. }
    ));
}

//
// Mutex resolution
//

#[test]
fn mutex_template_passes_through_verbatim() {
    let mut resource = thing();
    resource.mutex = Some("thing/{{name}}".to_string());

    let plan = resolve(&resource).unwrap();
    assert_eq!(plan.mutex.unwrap().source(), "thing/{{name}}");
}

#[test]
fn absent_mutex_resolves_to_none() {
    let plan = resolve(&thing()).unwrap();
    assert!(plan.mutex.is_none());
}

#[test]
fn mutex_token_outside_identity_is_rejected() {
    let mut resource = thing();
    resource.mutex = Some("thing/{{owner}}".to_string());

    let errs = resolve(&resource).unwrap_err();
    let violation = &errs.violations()[0];
    assert_eq!(violation.origin, ErrorOrigin::Mutex);
    assert!(matches!(
        &violation.error,
        ResolveError::UnknownIdentityToken { token, context: TokenContext::Mutex }
            if token == "owner"
    ));
}

#[test]
fn mutex_check_is_skipped_when_identity_failed() {
    let mut resource = thing();
    resource.identity = vec!["zone".to_string()];
    resource.mutex = Some("thing/{{zone}}".to_string());

    let errs = resolve(&resource).unwrap_err();
    assert_eq!(origins(&errs), vec![ErrorOrigin::Identity]);
}

//
// Policy assembly
//

#[test]
fn policy_merges_flags_and_hooks() {
    let mut resource = thing();
    resource.immutable = true;
    resource.autogen_async = true;
    resource.taint_resource_on_failed_create = true;
    resource.custom_diff = vec!["customdiff.ForceNewIfChange".to_string()];
    resource.error_retry_predicates = vec!["transport_tpg.IsThingRetryableError".to_string()];
    resource.error_abort_predicates = vec!["transport_tpg.IsThingQuotaError".to_string()];
    resource.deprecation_message = Some("use thing_v2 instead".to_string());

    let plan = resolve(&resource).unwrap();
    assert!(plan.policy.immutable);
    assert!(plan.policy.autogen_async);
    assert!(plan.policy.taint_resource_on_failed_create);
    assert_eq!(plan.policy.custom_diff.len(), 1);
    assert_eq!(
        plan.policy.error_retry_predicates,
        vec!["transport_tpg.IsThingRetryableError"]
    );
    assert_eq!(
        plan.policy.error_abort_predicates,
        vec!["transport_tpg.IsThingQuotaError"]
    );
    assert_eq!(
        plan.policy.deprecation_message.as_deref(),
        Some("use thing_v2 instead")
    );
}

#[test]
fn timeouts_default_per_operation() {
    let plan = resolve(&thing()).unwrap();
    assert_eq!(plan.policy.timeouts, Timeouts::default());

    let mut resource = thing();
    resource.timeouts = Some(Timeouts {
        insert_minutes: 60,
        ..Timeouts::default()
    });
    let plan = resolve(&resource).unwrap();
    assert_eq!(plan.policy.timeouts.insert_minutes, 60);
    assert_eq!(plan.policy.timeouts.delete_minutes, 20);
}

#[test]
fn exclude_resource_requires_iam_policy() {
    let mut resource = thing();
    resource.exclude_resource = true;

    let errs = resolve(&resource).unwrap_err();
    let violation = &errs.violations()[0];
    assert_eq!(violation.origin, ErrorOrigin::Policy);
    assert!(matches!(
        violation.error,
        ResolveError::ConflictingOverride { .. }
    ));

    let mut resource = thing();
    resource.exclude_resource = true;
    resource.iam_policy = Some(IamPolicy::default());
    assert!(resolve(&resource).is_ok());
}

#[test]
fn immutable_rejects_update_url_override() {
    let mut resource = thing();
    resource.immutable = true;
    resource.update_url = Some(SELF_LINK.to_string());

    let errs = resolve(&resource).unwrap_err();
    assert_eq!(origins(&errs), vec![ErrorOrigin::Policy]);
}

//
// Aggregation
//

#[test]
fn independent_failures_are_concatenated_in_origin_order() {
    let mut resource = thing();
    resource.create_verb = HttpVerb::Put; // no self_link override
    resource.schema_version = 1;
    resource.state_upgrade_base_schema_version = Some(2);
    resource.mutex = Some("thing/{{owner}}".to_string());

    let errs = resolve(&resource).unwrap_err();
    assert_eq!(
        origins(&errs),
        vec![ErrorOrigin::Url, ErrorOrigin::State, ErrorOrigin::Mutex]
    );
}

//
// Determinism & idempotence
//

#[test]
fn resolution_is_deterministic() {
    let mut resource = thing();
    resource.identity = vec!["region".to_string(), "name".to_string()];
    resource.mutex = Some("thing/{{region}}".to_string());
    resource.schema_version = 2;
    resource.state_upgraders = true;

    let first = resolve(&resource).unwrap();
    let second = resolve(&resource).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn materialized_defaults_reproduce_the_plan() {
    let resource = thing();
    let plan = resolve(&resource).unwrap();

    let explicit = materialize(&resource, &plan);
    let second = resolve(&explicit).unwrap();
    assert_eq!(plan, second);
}
