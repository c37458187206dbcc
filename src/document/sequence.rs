use crate::impl_param_described;
use crate::params::ParamList;

/// A protein (or other) sequence from a search database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DBSequence {
    pub id: String,
    pub accession: String,
    pub search_database_ref: String,
    pub name: Option<String>,
    pub length: Option<usize>,
    /// The residue sequence, written as `Seq` when present
    pub sequence: Option<String>,
    pub params: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Modification {
    /// 0 is the N-terminus, `len + 1` the C-terminus
    pub location: Option<usize>,
    pub monoisotopic_mass_delta: Option<f64>,
    pub average_mass_delta: Option<f64>,
    pub residues: Vec<char>,
    pub params: ParamList,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubstitutionModification {
    pub original_residue: char,
    pub replacement_residue: char,
    pub location: Option<usize>,
    pub monoisotopic_mass_delta: Option<f64>,
    pub average_mass_delta: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Peptide {
    pub id: String,
    pub name: Option<String>,
    pub sequence: String,
    pub modifications: Vec<Modification>,
    pub substitutions: Vec<SubstitutionModification>,
    pub params: ParamList,
}

impl Peptide {
    pub fn new<I: Into<String>, S: Into<String>>(id: I, sequence: S) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
            ..Default::default()
        }
    }
}

/// Connects a [`Peptide`] to the position it occupies in a [`DBSequence`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PeptideEvidence {
    pub id: String,
    pub db_sequence_ref: String,
    pub peptide_ref: String,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub pre: Option<char>,
    pub post: Option<char>,
    pub is_decoy: bool,
    pub params: ParamList,
}

impl_param_described!(DBSequence, Modification, Peptide, PeptideEvidence);

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequenceCollection {
    pub db_sequences: Vec<DBSequence>,
    pub peptides: Vec<Peptide>,
    pub peptide_evidence: Vec<PeptideEvidence>,
}

impl SequenceCollection {
    pub fn get_peptide(&self, id: &str) -> Option<&Peptide> {
        self.peptides.iter().find(|p| p.id == id)
    }

    pub fn get_db_sequence(&self, id: &str) -> Option<&DBSequence> {
        self.db_sequences.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.db_sequences.is_empty() && self.peptides.is_empty() && self.peptide_evidence.is_empty()
    }
}
