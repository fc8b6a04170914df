use crate::{
    error::{ResolveError, TokenContext},
    resolve::identity::IdentityPlan,
    template::Template,
};
use crudgen_schema::resource::Resource;

/// Resolve the lock-name template serializing concurrent API calls.
///
/// Lock names are hand-authored and used verbatim; resolution only checks
/// that every embedded token is substitutable from the identity at call
/// time. An absent mutex means the generated client issues calls without
/// serialization.
pub(crate) fn resolve_mutex(
    resource: &Resource,
    identity: &IdentityPlan,
) -> Result<Option<Template>, Vec<ResolveError>> {
    let Some(source) = &resource.mutex else {
        return Ok(None);
    };

    let mut errors = Vec::new();

    let template = match Template::parse(source) {
        Ok(template) => template,
        Err(err) => {
            errors.push(ResolveError::MalformedTemplate {
                context: TokenContext::Mutex,
                message: err.to_string(),
            });
            return Err(errors);
        }
    };

    if template.has_greedy_fields() {
        errors.push(ResolveError::MalformedTemplate {
            context: TokenContext::Mutex,
            message: "greedy tokens are not allowed in lock names".to_string(),
        });
    }

    for token in template.field_names() {
        if !identity.is_identity_field(token) {
            errors.push(ResolveError::UnknownIdentityToken {
                token: token.to_string(),
                context: TokenContext::Mutex,
            });
        }
    }

    if errors.is_empty() {
        Ok(Some(template))
    } else {
        Err(errors)
    }
}
