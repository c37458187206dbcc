use crate::impl_param_described;
use crate::params::{Param, ParamList};

/// Links a [`Person`](crate::document::Person) or
/// [`Organization`](crate::document::Organization) to the thing it contributed to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContactRole {
    pub contact_ref: String,
    /// The role term, e.g. `MS:1001271` "researcher"
    pub role: Param,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisSoftware {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub uri: Option<String>,
    pub contact_role: Option<ContactRole>,
    /// The term naming the software, written in `SoftwareName`
    pub software_name: Option<Param>,
    pub customizations: Option<String>,
    pub params: ParamList,
}

impl_param_described!(AnalysisSoftware);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisSoftwareList {
    pub software: Vec<AnalysisSoftware>,
}

impl AnalysisSoftwareList {
    pub fn push(&mut self, software: AnalysisSoftware) {
        self.software.push(software)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisSoftware> {
        self.software.iter()
    }

    pub fn len(&self) -> usize {
        self.software.len()
    }

    pub fn is_empty(&self) -> bool {
        self.software.is_empty()
    }
}
