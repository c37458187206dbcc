use crate::impl_param_described;
use crate::params::ParamList;

use super::software::ContactRole;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubSample {
    pub sample_ref: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sample {
    pub id: String,
    pub name: Option<String>,
    pub contact_roles: Vec<ContactRole>,
    pub sub_samples: Vec<SubSample>,
    pub params: ParamList,
}

impl Sample {
    pub fn new(id: String, name: Option<String>, params: ParamList) -> Self {
        Self {
            id,
            name,
            params,
            ..Default::default()
        }
    }
}

impl_param_described!(Sample);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisSampleCollection {
    pub samples: Vec<Sample>,
}

impl AnalysisSampleCollection {
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
