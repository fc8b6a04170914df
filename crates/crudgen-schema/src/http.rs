use crate::prelude::*;
use std::fmt;

///
/// HttpVerb
///
/// Wire verbs a descriptor may assign to its CRUD operations. Which verbs
/// are acceptable for which operation is enforced during resolution, not
/// here.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Delete,
    Get,
    Patch,
    Post,
    Put,
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Delete => "DELETE",
            Self::Get => "GET",
            Self::Patch => "PATCH",
            Self::Post => "POST",
            Self::Put => "PUT",
        };
        write!(f, "{label}")
    }
}
