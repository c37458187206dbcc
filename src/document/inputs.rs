use crate::impl_param_described;
use crate::params::{Param, ParamList};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SourceFile {
    pub id: String,
    pub location: String,
    pub name: Option<String>,
    pub file_format: Option<Param>,
    pub params: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchDatabase {
    pub id: String,
    pub location: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub num_database_sequences: Option<u64>,
    pub file_format: Option<Param>,
    pub database_name: Param,
    pub params: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpectraData {
    pub id: String,
    pub location: String,
    pub name: Option<String>,
    pub file_format: Option<Param>,
    /// How spectra in this file are identified, e.g. `MS:1000774`
    /// "multiple peak list nativeID format"
    pub spectrum_id_format: Param,
}

impl_param_described!(SourceFile, SearchDatabase);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Inputs {
    pub source_files: Vec<SourceFile>,
    pub search_databases: Vec<SearchDatabase>,
    pub spectra_data: Vec<SpectraData>,
}
