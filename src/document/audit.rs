use crate::impl_param_described;
use crate::params::ParamList;

use super::software::ContactRole;

/// The person or organization that produced the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Provider {
    pub id: String,
    pub name: Option<String>,
    pub analysis_software_ref: Option<String>,
    pub contact_role: Option<ContactRole>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Affiliation {
    pub organization_ref: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Person {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub mid_initials: Option<String>,
    pub last_name: Option<String>,
    pub affiliations: Vec<Affiliation>,
    /// Contact details such as `MS:1000589` "contact email"
    pub params: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Organization {
    pub id: String,
    pub name: Option<String>,
    pub parent: Option<String>,
    pub params: ParamList,
}

impl_param_described!(Person, Organization);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AuditCollection {
    pub persons: Vec<Person>,
    pub organizations: Vec<Organization>,
}

impl AuditCollection {
    pub fn len(&self) -> usize {
        self.persons.len() + self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty() && self.organizations.is_empty()
    }
}
