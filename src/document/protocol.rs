use crate::params::{Param, ParamList};

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchModification {
    pub fixed_mod: bool,
    pub mass_delta: f64,
    /// Residues the modification may occur on, `.` for any
    pub residues: Vec<char>,
    pub params: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Enzyme {
    pub id: String,
    pub name: Option<String>,
    pub missed_cleavages: Option<u32>,
    pub semi_specific: Option<bool>,
    pub site_regexp: Option<String>,
    pub enzyme_name: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpectrumIdentificationProtocol {
    pub id: String,
    pub name: Option<String>,
    pub analysis_software_ref: String,
    /// e.g. `MS:1001083` "ms-ms search"
    pub search_type: Param,
    pub additional_search_params: ParamList,
    pub modifications: Vec<SearchModification>,
    pub enzymes: Vec<Enzyme>,
    pub fragment_tolerance: ParamList,
    pub parent_tolerance: ParamList,
    pub threshold: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProteinDetectionProtocol {
    pub id: String,
    pub name: Option<String>,
    pub analysis_software_ref: String,
    pub analysis_params: ParamList,
    pub threshold: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisProtocolCollection {
    pub spectrum_identification_protocols: Vec<SpectrumIdentificationProtocol>,
    pub protein_detection_protocol: Option<ProteinDetectionProtocol>,
}
