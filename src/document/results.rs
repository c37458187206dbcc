use crate::impl_param_described;
use crate::params::ParamList;

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpectrumIdentificationItem {
    pub id: String,
    pub name: Option<String>,
    pub charge_state: i32,
    pub experimental_mass_to_charge: f64,
    pub calculated_mass_to_charge: Option<f64>,
    pub calculated_pi: Option<f32>,
    pub peptide_ref: Option<String>,
    pub rank: u32,
    pub pass_threshold: bool,
    pub sample_ref: Option<String>,
    pub peptide_evidence_refs: Vec<String>,
    /// Scores and other per-match terms
    pub params: ParamList,
}

/// All of the candidate matches for a single spectrum
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpectrumIdentificationResult {
    pub id: String,
    pub name: Option<String>,
    pub spectrum_id: String,
    pub spectra_data_ref: String,
    pub items: Vec<SpectrumIdentificationItem>,
    pub params: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpectrumIdentificationList {
    pub id: String,
    pub name: Option<String>,
    pub num_sequences_searched: Option<u64>,
    pub results: Vec<SpectrumIdentificationResult>,
    pub params: ParamList,
}

impl SpectrumIdentificationList {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpectrumIdentificationResult> {
        self.results.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PeptideHypothesis {
    pub peptide_evidence_ref: String,
    pub spectrum_identification_item_refs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProteinDetectionHypothesis {
    pub id: String,
    pub name: Option<String>,
    pub db_sequence_ref: Option<String>,
    pub pass_threshold: bool,
    pub peptide_hypotheses: Vec<PeptideHypothesis>,
    pub params: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProteinAmbiguityGroup {
    pub id: String,
    pub name: Option<String>,
    pub hypotheses: Vec<ProteinDetectionHypothesis>,
    pub params: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProteinDetectionList {
    pub id: String,
    pub name: Option<String>,
    pub groups: Vec<ProteinAmbiguityGroup>,
    pub params: ParamList,
}

impl_param_described!(
    SpectrumIdentificationItem,
    SpectrumIdentificationResult,
    SpectrumIdentificationList,
    ProteinDetectionHypothesis,
    ProteinAmbiguityGroup,
    ProteinDetectionList
);
