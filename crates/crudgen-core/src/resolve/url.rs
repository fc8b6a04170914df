use crate::error::{ResolveError, UrlKind};
use convert_case::{Case, Casing};
use crudgen_schema::{http::HttpVerb, resource::Resource};
use serde::Serialize;

///
/// UrlPlan
///
/// The four operational URLs plus the read-query and collection-key
/// defaults, fully resolved. `skip_read` / `skip_delete` do not suppress
/// resolution — handwritten overrides may still reference the URLs — the
/// lifecycle policy marks those operations inactive instead.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UrlPlan {
    pub self_link: String,
    pub create_url: String,
    pub update_url: String,
    pub delete_url: String,
    pub read_query_params: String,
    pub collection_url_key: String,
    pub create_verb: HttpVerb,
    pub read_verb: HttpVerb,
    pub update_verb: HttpVerb,
    pub delete_verb: HttpVerb,
}

/// Resolve the operational URLs through the verb-conditioned defaulting
/// chain: self link first, then create, then update/delete off the self
/// link.
pub(crate) fn resolve_urls(resource: &Resource) -> Result<UrlPlan, Vec<ResolveError>> {
    let mut errors = Vec::new();

    validate_verbs(resource, &mut errors);

    let self_link = match &resource.self_link {
        Some(url) => Some(url.clone()),
        None if resource.create_verb == HttpVerb::Post => Some(resource.base_url.clone()),
        None => {
            // PUT/PATCH creates carry no derivable identity URL; an
            // explicit override is required.
            errors.push(ResolveError::UnresolvableUrl {
                url: UrlKind::SelfLink,
                reason: format!(
                    "create_verb {} requires an explicit self_link override",
                    resource.create_verb
                ),
            });
            None
        }
    };

    let create_url = match &resource.create_url {
        Some(url) => Some(url.clone()),
        None if resource.create_verb == HttpVerb::Post => Some(resource.base_url.clone()),
        None => self_link.clone(),
    };

    let update_url = resource.update_url.clone().or_else(|| self_link.clone());
    let delete_url = resource.delete_url.clone().or_else(|| self_link.clone());

    let read_query_params = resource.read_query_params.clone().unwrap_or_default();
    let collection_url_key = resource
        .collection_url_key
        .clone()
        .unwrap_or_else(|| collection_key_from_name(&resource.name));

    match (self_link, create_url, update_url, delete_url) {
        (Some(self_link), Some(create_url), Some(update_url), Some(delete_url))
            if errors.is_empty() =>
        {
            Ok(UrlPlan {
                self_link,
                create_url,
                update_url,
                delete_url,
                read_query_params,
                collection_url_key,
                create_verb: resource.create_verb,
                read_verb: resource.read_verb,
                update_verb: resource.update_verb,
                delete_verb: resource.delete_verb,
            })
        }
        _ => Err(errors),
    }
}

// Verb sets accepted per operation; anything else is a configuration
// conflict, not a defaulting gap.
fn validate_verbs(resource: &Resource, errors: &mut Vec<ResolveError>) {
    use HttpVerb::{Delete, Get, Patch, Post, Put};

    if !matches!(resource.create_verb, Post | Put | Patch) {
        errors.push(verb_conflict("create_verb", resource.create_verb));
    }
    if resource.read_verb != Get {
        errors.push(verb_conflict("read_verb", resource.read_verb));
    }
    if !matches!(resource.update_verb, Put | Patch | Post) {
        errors.push(verb_conflict("update_verb", resource.update_verb));
    }
    if !matches!(resource.delete_verb, Delete | Post) {
        errors.push(verb_conflict("delete_verb", resource.delete_verb));
    }
}

fn verb_conflict(field: &str, verb: HttpVerb) -> ResolveError {
    ResolveError::ConflictingOverride {
        message: format!("{field} does not accept {verb}"),
    }
}

// Collection keys follow the API convention of a camelCase plural of the
// resource name.
fn collection_key_from_name(name: &str) -> String {
    pluralize(&name.to_case(Case::Camel))
}

fn pluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('y') {
        let vowel_before = stem
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if !stem.is_empty() && !vowel_before {
            return format!("{stem}ies");
        }
    }

    if name.ends_with(['s', 'x', 'z']) || name.ends_with("ch") || name.ends_with("sh") {
        return format!("{name}es");
    }

    format!("{name}s")
}
