use crate::prelude::*;

///
/// Resource
///
/// The declarative description of a single API resource: URLs, verbs,
/// identity, import formats, state-schema history, and per-operation
/// lifecycle flags. Constructed once by the configuration loader and never
/// mutated; resolution is a pure function over this value.
///
/// Optional fields left unset here are filled by the resolver's defaulting
/// chain, not at deserialization time, so a descriptor round-trips exactly
/// as authored.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Resource {
    pub name: String,

    /// Collection URL of the resource, relative to the product base.
    pub base_url: String,

    /// Identity URL. Defaults to `base_url` for POST-create resources;
    /// PUT/PATCH-create resources must set it explicitly.
    #[serde(default)]
    pub self_link: Option<String>,

    /// Defaults to the collection URL for POST, else to the self link.
    #[serde(default)]
    pub create_url: Option<String>,

    /// Defaults to the self link.
    #[serde(default)]
    pub update_url: Option<String>,

    /// Defaults to the self link.
    #[serde(default)]
    pub delete_url: Option<String>,

    #[serde(default = "default_create_verb")]
    pub create_verb: HttpVerb,

    #[serde(default = "default_read_verb")]
    pub read_verb: HttpVerb,

    #[serde(default = "default_update_verb")]
    pub update_verb: HttpVerb,

    #[serde(default = "default_delete_verb")]
    pub delete_verb: HttpVerb,

    /// Extra query parameters appended to reads. Defaults to none.
    #[serde(default)]
    pub read_query_params: Option<String>,

    /// Key of the item list inside the collection's list response.
    /// Defaults to the camelCase plural of `name`.
    #[serde(default)]
    pub collection_url_key: Option<String>,

    /// Ordered names of the fields that uniquely address an instance.
    /// Empty means the implicit `name` field.
    #[serde(default)]
    pub identity: Vec<String>,

    #[serde(default)]
    pub nested_query: Option<NestedQuery>,

    /// Opaque IAM sub-resource configuration; presence matters for the
    /// `exclude_resource` conflict check, content is another pipeline's.
    #[serde(default)]
    pub iam_policy: Option<IamPolicy>,

    /// Generate only the IAM artifact for this resource.
    #[serde(default)]
    pub exclude_resource: bool,

    #[serde(default)]
    pub immutable: bool,

    /// Updates send an update mask listing changed fields.
    #[serde(default)]
    pub update_mask: bool,

    /// Resource is observable but not configurable.
    #[serde(default)]
    pub readonly: bool,

    /// Template for the managed-state id. Defaults to the identity fields
    /// joined as `{{a}}/{{b}}`.
    #[serde(default)]
    pub id_format: Option<String>,

    /// Ordered import templates, tried first-to-last at import time.
    /// Defaults to the id format.
    #[serde(default)]
    pub import_format: Vec<String>,

    #[serde(default)]
    pub exclude_import: bool,

    /// Names of custom diff-suppression hooks wired in by the emitter.
    #[serde(default)]
    pub custom_diff: Vec<String>,

    /// Hand-authored lock-name template serializing concurrent API calls
    /// against the same logical resource.
    #[serde(default)]
    pub mutex: Option<String>,

    #[serde(default)]
    pub virtual_fields: Vec<VirtualField>,

    /// Generate long-running-operation polling for mutations.
    #[serde(default)]
    pub autogen_async: bool,

    #[serde(default)]
    pub timeouts: Option<Timeouts>,

    /// Names of predicates classifying an error as retryable.
    #[serde(default)]
    pub error_retry_predicates: Vec<String>,

    /// Names of predicates classifying an error as terminal.
    #[serde(default)]
    pub error_abort_predicates: Vec<String>,

    #[serde(default)]
    pub schema_version: u32,

    /// First version state upgraders are generated from. Defaults to 0.
    #[serde(default)]
    pub state_upgrade_base_schema_version: Option<u32>,

    #[serde(default)]
    pub state_upgraders: bool,

    /// Legacy single-function state migration hook. Mutually exclusive
    /// with `state_upgraders`.
    #[serde(default)]
    pub migrate_state: Option<String>,

    #[serde(default)]
    pub skip_read: bool,

    #[serde(default)]
    pub skip_delete: bool,

    #[serde(default)]
    pub supports_indirect_user_project_override: bool,

    #[serde(default)]
    pub legacy_long_form_project: bool,

    /// Name of a hook rewriting read errors before not-found handling.
    #[serde(default)]
    pub read_error_transform: Option<String>,

    /// Mark half-created resources for delete-and-recreate on next apply.
    #[serde(default)]
    pub taint_resource_on_failed_create: bool,

    #[serde(default)]
    pub deprecation_message: Option<String>,

    #[serde(default)]
    pub properties: FieldList,

    #[serde(default)]
    pub parameters: FieldList,
}

impl Resource {
    /// A descriptor with every optional field at its unset state.
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            self_link: None,
            create_url: None,
            update_url: None,
            delete_url: None,
            create_verb: default_create_verb(),
            read_verb: default_read_verb(),
            update_verb: default_update_verb(),
            delete_verb: default_delete_verb(),
            read_query_params: None,
            collection_url_key: None,
            identity: Vec::new(),
            nested_query: None,
            iam_policy: None,
            exclude_resource: false,
            immutable: false,
            update_mask: false,
            readonly: false,
            id_format: None,
            import_format: Vec::new(),
            exclude_import: false,
            custom_diff: Vec::new(),
            mutex: None,
            virtual_fields: Vec::new(),
            autogen_async: false,
            timeouts: None,
            error_retry_predicates: Vec::new(),
            error_abort_predicates: Vec::new(),
            schema_version: 0,
            state_upgrade_base_schema_version: None,
            state_upgraders: false,
            migrate_state: None,
            skip_read: false,
            skip_delete: false,
            supports_indirect_user_project_override: false,
            legacy_long_form_project: false,
            read_error_transform: None,
            taint_resource_on_failed_create: false,
            deprecation_message: None,
            properties: FieldList::default(),
            parameters: FieldList::default(),
        }
    }

    /// Iterate every declared field name: properties, then parameters,
    /// then virtual fields.
    pub fn declared_field_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .names()
            .chain(self.parameters.names())
            .chain(self.virtual_fields.iter().map(|v| v.name.as_str()))
    }

    #[must_use]
    pub fn declares_field(&self, name: &str) -> bool {
        self.declared_field_names().any(|n| n == name)
    }
}

const fn default_create_verb() -> HttpVerb {
    HttpVerb::Post
}

const fn default_read_verb() -> HttpVerb {
    HttpVerb::Get
}

const fn default_update_verb() -> HttpVerb {
    HttpVerb::Put
}

const fn default_delete_verb() -> HttpVerb {
    HttpVerb::Delete
}

///
/// IamPolicy
///
/// Marker for a resource-specific IAM policy block. IAM artifact
/// generation is a separate pipeline built on the same resolver output.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IamPolicy {
    #[serde(default)]
    pub parent_resource_attribute: Option<String>,

    #[serde(default)]
    pub method_name_separator: Option<String>,
}
