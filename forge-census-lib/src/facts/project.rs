use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use strum::Display as StrumDisplay;

/// Kind of entity owning a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, StrumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NamespaceKind {
    User,
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Namespace {
    pub kind: NamespaceKind,
    pub name: String,
}

/// A project as it appears in the listing endpoint, with only the fields we need
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub namespace: Namespace,
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}
