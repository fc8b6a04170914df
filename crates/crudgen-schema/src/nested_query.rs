use crate::prelude::*;

///
/// NestedQuery
///
/// Reshapes read requests for fine-grained resources that live inside a
/// parent object or collection rather than behind their own GET URL.
/// `keys` is the path of JSON keys walked to reach the nested value.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NestedQuery {
    pub keys: Vec<String>,

    /// The nested collection holds bare ids rather than full objects.
    #[serde(default)]
    pub is_list_of_ids: bool,

    /// Reads go to the parent collection URL instead of the resource URL.
    #[serde(default)]
    pub modify_base_url: bool,
}
