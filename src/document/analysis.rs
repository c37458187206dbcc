use chrono::NaiveDateTime;

/// A single search run, linking its protocol, inputs and result list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpectrumIdentification {
    pub id: String,
    pub name: Option<String>,
    pub spectrum_identification_protocol_ref: String,
    pub spectrum_identification_list_ref: String,
    pub activity_date: Option<NaiveDateTime>,
    pub input_spectra: Vec<String>,
    pub search_database_refs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProteinDetection {
    pub id: String,
    pub name: Option<String>,
    pub protein_detection_protocol_ref: String,
    pub protein_detection_list_ref: String,
    pub activity_date: Option<NaiveDateTime>,
    pub input_spectrum_identifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisCollection {
    pub spectrum_identifications: Vec<SpectrumIdentification>,
    pub protein_detection: Option<ProteinDetection>,
}
