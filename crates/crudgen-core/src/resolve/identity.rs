use crate::{
    error::{ResolveError, TokenContext},
    template::Template,
};
use crudgen_schema::resource::Resource;
use serde::Serialize;
use std::collections::BTreeMap;

/// Identity used when a descriptor declares none.
pub const IMPLICIT_IDENTITY_FIELD: &str = "name";

///
/// IdentityPlan
///
/// Ordered identity fields plus the compiled id and import templates.
/// The field order is the declaration order; it parameterizes URLs and
/// the managed-state id.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IdentityPlan {
    pub fields: Vec<String>,
    pub id_format: Template,
    pub import: Vec<ImportMatcher>,
}

impl IdentityPlan {
    #[must_use]
    pub fn is_identity_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }
}

///
/// ImportMatcher
///
/// One compiled import format. Matchers are tried first-to-last by the
/// import resolver, preserving declaration order exactly: earlier, more
/// specific patterns must win over general fallbacks.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ImportMatcher {
    template: Template,
}

impl ImportMatcher {
    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// Anchored regex equivalent for emitters that match textually.
    #[must_use]
    pub fn to_regex(&self) -> String {
        self.template.to_regex()
    }

    /// Match a user-supplied import id, returning identity field values.
    #[must_use]
    pub fn matches(&self, input: &str) -> Option<BTreeMap<String, String>> {
        self.template.capture(input)
    }
}

/// Compile the identity field list, id format, and import matchers.
pub(crate) fn compile_identity(resource: &Resource) -> Result<IdentityPlan, Vec<ResolveError>> {
    let mut errors = Vec::new();

    let fields = if resource.identity.is_empty() {
        vec![IMPLICIT_IDENTITY_FIELD.to_string()]
    } else {
        for name in &resource.identity {
            if !resource.declares_field(name) {
                errors.push(ResolveError::UnknownIdentityToken {
                    token: name.clone(),
                    context: TokenContext::Identity,
                });
            }
        }
        resource.identity.clone()
    };

    if resource.nested_query.is_some() && resource.identity.is_empty() {
        errors.push(ResolveError::ConflictingOverride {
            message: "nested_query requires an explicit identity".to_string(),
        });
    }

    let id_source = resource
        .id_format
        .clone()
        .unwrap_or_else(|| default_id_format(&fields));
    let id_format = compile_template(&id_source, TokenContext::IdFormat, &fields, &mut errors);

    if let Some(template) = &id_format
        && template.has_greedy_fields()
    {
        errors.push(ResolveError::MalformedTemplate {
            context: TokenContext::IdFormat,
            message: "greedy tokens are not allowed in the id format".to_string(),
        });
    }

    let import = if resource.exclude_import {
        // The id format stays validated above; setId still needs it.
        Vec::new()
    } else if resource.import_format.is_empty() {
        id_format
            .clone()
            .map(|template| vec![ImportMatcher { template }])
            .unwrap_or_default()
    } else {
        resource
            .import_format
            .iter()
            .enumerate()
            .filter_map(|(index, source)| {
                compile_template(
                    source,
                    TokenContext::ImportFormat { index },
                    &fields,
                    &mut errors,
                )
                .map(|template| ImportMatcher { template })
            })
            .collect()
    };

    match (id_format, errors.is_empty()) {
        (Some(id_format), true) => Ok(IdentityPlan {
            fields,
            id_format,
            import,
        }),
        _ => Err(errors),
    }
}

// Parse a template and check every token against the identity fields.
fn compile_template(
    source: &str,
    context: TokenContext,
    identity: &[String],
    errors: &mut Vec<ResolveError>,
) -> Option<Template> {
    let template = match Template::parse(source) {
        Ok(template) => template,
        Err(err) => {
            errors.push(ResolveError::MalformedTemplate {
                context,
                message: err.to_string(),
            });
            return None;
        }
    };

    let mut valid = true;
    for token in template.field_names() {
        if !identity.iter().any(|f| f == token) {
            errors.push(ResolveError::UnknownIdentityToken {
                token: token.to_string(),
                context,
            });
            valid = false;
        }
    }

    valid.then_some(template)
}

// Defaults to the identity values joined as a path, eg `{{region}}/{{name}}`.
fn default_id_format(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| format!("{{{{{f}}}}}"))
        .collect::<Vec<_>>()
        .join("/")
}
