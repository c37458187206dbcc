//! An in-memory model of an mzIdentML document.
//!
//! [`MzIdentMLDocument`] holds each top-level section of the schema as an
//! independent [`Option`]. Cross-references between sections (e.g. a
//! [`PeptideEvidence`] pointing at a [`DBSequence`]) are plain string ids and are
//! not checked here.
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

pub mod analysis;
pub mod audit;
pub mod cv;
pub mod inputs;
pub mod protocol;
pub mod results;
pub mod sample;
pub mod sequence;
pub mod software;

pub use crate::document::analysis::{AnalysisCollection, ProteinDetection, SpectrumIdentification};
pub use crate::document::audit::{Affiliation, AuditCollection, Organization, Person, Provider};
pub use crate::document::cv::{Cv, CvList};
pub use crate::document::inputs::{Inputs, SearchDatabase, SourceFile, SpectraData};
pub use crate::document::protocol::{
    AnalysisProtocolCollection, Enzyme, ProteinDetectionProtocol, SearchModification,
    SpectrumIdentificationProtocol,
};
pub use crate::document::results::{
    PeptideHypothesis, ProteinAmbiguityGroup, ProteinDetectionHypothesis, ProteinDetectionList,
    SpectrumIdentificationItem, SpectrumIdentificationList, SpectrumIdentificationResult,
};
pub use crate::document::sample::{AnalysisSampleCollection, Sample, SubSample};
pub use crate::document::sequence::{
    DBSequence, Modification, Peptide, PeptideEvidence, SequenceCollection,
    SubstitutionModification,
};
pub use crate::document::software::{AnalysisSoftware, AnalysisSoftwareList, ContactRole};

/// The versions of the mzIdentML schema a document can be written against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MzIdentMLVersion {
    #[default]
    V1_1_0,
    V1_2_0,
}

impl MzIdentMLVersion {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1_1_0 => "1.1.0",
            Self::V1_2_0 => "1.2.0",
        }
    }

    pub const fn namespace(&self) -> &'static str {
        match self {
            Self::V1_1_0 => "http://psidev.info/psi/pi/mzIdentML/1.1",
            Self::V1_2_0 => "http://psidev.info/psi/pi/mzIdentML/1.2",
        }
    }

    pub const fn schema_location(&self) -> &'static str {
        match self {
            Self::V1_1_0 => {
                "http://psidev.info/psi/pi/mzIdentML/1.1 http://psidev.info/files/mzIdentML1.1.0.xsd"
            }
            Self::V1_2_0 => {
                "http://psidev.info/psi/pi/mzIdentML/1.2 http://psidev.info/files/mzIdentML1.2.0.xsd"
            }
        }
    }
}

impl Display for MzIdentMLVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported mzIdentML version: {0:?}")]
pub struct UnknownVersionError(pub String);

impl FromStr for MzIdentMLVersion {
    type Err = UnknownVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.1" | "1.1.0" | "1.1.1" => Ok(Self::V1_1_0),
            "1.2" | "1.2.0" => Ok(Self::V1_2_0),
            other => Err(UnknownVersionError(other.to_string())),
        }
    }
}

/// The top-level sections of an mzIdentML document, in the order the schema
/// requires them to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentSection {
    CvList,
    AnalysisSoftwareList,
    Provider,
    AuditCollection,
    AnalysisSampleCollection,
    SequenceCollection,
    AnalysisCollection,
    AnalysisProtocolCollection,
    Inputs,
    SpectrumIdentificationList,
    ProteinDetectionList,
}

impl DocumentSection {
    /// The sections that precede `DataCollection`
    pub const HEADER: [DocumentSection; 8] = [
        Self::CvList,
        Self::AnalysisSoftwareList,
        Self::Provider,
        Self::AuditCollection,
        Self::AnalysisSampleCollection,
        Self::SequenceCollection,
        Self::AnalysisCollection,
        Self::AnalysisProtocolCollection,
    ];

    /// The sections nested in `DataCollection/AnalysisData`
    pub const ANALYSIS_DATA: [DocumentSection; 2] =
        [Self::SpectrumIdentificationList, Self::ProteinDetectionList];

    pub const fn element_name(&self) -> &'static str {
        match self {
            Self::CvList => "cvList",
            Self::AnalysisSoftwareList => "AnalysisSoftwareList",
            Self::Provider => "Provider",
            Self::AuditCollection => "AuditCollection",
            Self::AnalysisSampleCollection => "AnalysisSampleCollection",
            Self::SequenceCollection => "SequenceCollection",
            Self::AnalysisCollection => "AnalysisCollection",
            Self::AnalysisProtocolCollection => "AnalysisProtocolCollection",
            Self::Inputs => "Inputs",
            Self::SpectrumIdentificationList => "SpectrumIdentificationList",
            Self::ProteinDetectionList => "ProteinDetectionList",
        }
    }

    /// Borrow this section from `document` if it is present
    pub fn section<'a>(&self, document: &'a MzIdentMLDocument) -> Option<SectionRef<'a>> {
        match self {
            Self::CvList => document.cv_list.as_ref().map(SectionRef::CvList),
            Self::AnalysisSoftwareList => document
                .analysis_software_list
                .as_ref()
                .map(SectionRef::AnalysisSoftwareList),
            Self::Provider => document.provider.as_ref().map(SectionRef::Provider),
            Self::AuditCollection => document
                .audit_collection
                .as_ref()
                .map(SectionRef::AuditCollection),
            Self::AnalysisSampleCollection => document
                .analysis_sample_collection
                .as_ref()
                .map(SectionRef::AnalysisSampleCollection),
            Self::SequenceCollection => document
                .sequence_collection
                .as_ref()
                .map(SectionRef::SequenceCollection),
            Self::AnalysisCollection => document
                .analysis_collection
                .as_ref()
                .map(SectionRef::AnalysisCollection),
            Self::AnalysisProtocolCollection => document
                .analysis_protocol_collection
                .as_ref()
                .map(SectionRef::AnalysisProtocolCollection),
            Self::Inputs => document.inputs.as_ref().map(SectionRef::Inputs),
            Self::SpectrumIdentificationList => document
                .spectrum_identification_list
                .as_ref()
                .map(SectionRef::SpectrumIdentificationList),
            Self::ProteinDetectionList => document
                .protein_detection_list
                .as_ref()
                .map(SectionRef::ProteinDetectionList),
        }
    }
}

impl Display for DocumentSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_name())
    }
}

/// A borrowed, present section of a [`MzIdentMLDocument`], ready to be marshalled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionRef<'a> {
    CvList(&'a CvList),
    AnalysisSoftwareList(&'a AnalysisSoftwareList),
    Provider(&'a Provider),
    AuditCollection(&'a AuditCollection),
    AnalysisSampleCollection(&'a AnalysisSampleCollection),
    SequenceCollection(&'a SequenceCollection),
    AnalysisCollection(&'a AnalysisCollection),
    AnalysisProtocolCollection(&'a AnalysisProtocolCollection),
    Inputs(&'a Inputs),
    SpectrumIdentificationList(&'a SpectrumIdentificationList),
    ProteinDetectionList(&'a ProteinDetectionList),
}

impl SectionRef<'_> {
    pub const fn kind(&self) -> DocumentSection {
        match self {
            Self::CvList(_) => DocumentSection::CvList,
            Self::AnalysisSoftwareList(_) => DocumentSection::AnalysisSoftwareList,
            Self::Provider(_) => DocumentSection::Provider,
            Self::AuditCollection(_) => DocumentSection::AuditCollection,
            Self::AnalysisSampleCollection(_) => DocumentSection::AnalysisSampleCollection,
            Self::SequenceCollection(_) => DocumentSection::SequenceCollection,
            Self::AnalysisCollection(_) => DocumentSection::AnalysisCollection,
            Self::AnalysisProtocolCollection(_) => DocumentSection::AnalysisProtocolCollection,
            Self::Inputs(_) => DocumentSection::Inputs,
            Self::SpectrumIdentificationList(_) => DocumentSection::SpectrumIdentificationList,
            Self::ProteinDetectionList(_) => DocumentSection::ProteinDetectionList,
        }
    }
}

/// The container for all of the top-level sections of an mzIdentML document.
///
/// Populate it completely before handing it to a writer. Any section left as
/// `None` is omitted from the output entirely.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MzIdentMLDocument {
    pub version: MzIdentMLVersion,
    pub cv_list: Option<CvList>,
    pub analysis_software_list: Option<AnalysisSoftwareList>,
    pub provider: Option<Provider>,
    pub audit_collection: Option<AuditCollection>,
    pub analysis_sample_collection: Option<AnalysisSampleCollection>,
    pub sequence_collection: Option<SequenceCollection>,
    pub analysis_collection: Option<AnalysisCollection>,
    pub analysis_protocol_collection: Option<AnalysisProtocolCollection>,
    pub inputs: Option<Inputs>,
    pub spectrum_identification_list: Option<SpectrumIdentificationList>,
    pub protein_detection_list: Option<ProteinDetectionList>,
}

impl MzIdentMLDocument {
    pub fn new(version: MzIdentMLVersion) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    pub fn section(&self, kind: DocumentSection) -> Option<SectionRef<'_>> {
        kind.section(self)
    }

    pub fn has_section(&self, kind: DocumentSection) -> bool {
        self.section(kind).is_some()
    }

    /// Iterate over the present sections in document order
    pub fn sections(&self) -> impl Iterator<Item = SectionRef<'_>> + '_ {
        DocumentSection::HEADER
            .into_iter()
            .chain(std::iter::once(DocumentSection::Inputs))
            .chain(DocumentSection::ANALYSIS_DATA)
            .filter_map(|kind| kind.section(self))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!("1.1.0".parse::<MzIdentMLVersion>().unwrap(), MzIdentMLVersion::V1_1_0);
        assert_eq!("1.2".parse::<MzIdentMLVersion>().unwrap(), MzIdentMLVersion::V1_2_0);
        assert!("2.0".parse::<MzIdentMLVersion>().is_err());
        assert_eq!(MzIdentMLVersion::V1_2_0.to_string(), "1.2.0");
        assert!(MzIdentMLVersion::V1_2_0
            .schema_location()
            .starts_with(MzIdentMLVersion::V1_2_0.namespace()));
    }

    #[test]
    fn test_section_presence() {
        let mut doc = MzIdentMLDocument::default();
        assert_eq!(doc.sections().count(), 0);

        doc.inputs = Some(Inputs::default());
        doc.cv_list = Some(CvList::default());
        doc.protein_detection_list = Some(ProteinDetectionList::default());

        let kinds: Vec<_> = doc.sections().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                DocumentSection::CvList,
                DocumentSection::Inputs,
                DocumentSection::ProteinDetectionList
            ]
        );
        assert!(doc.has_section(DocumentSection::Inputs));
        assert!(!doc.has_section(DocumentSection::Provider));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let doc: MzIdentMLDocument =
            serde_json::from_str(r#"{"version": "V1_2_0", "provider": {"id": "PROVIDER"}}"#)
                .unwrap();
        assert_eq!(doc.version, MzIdentMLVersion::V1_2_0);
        assert_eq!(doc.provider.as_ref().map(|p| p.id.as_str()), Some("PROVIDER"));
        assert!(doc.cv_list.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_sparse_json() {
        use crate::params::ParamLike;

        let doc: MzIdentMLDocument = serde_json::from_str(
            r#"{
                "audit_collection": {"persons": [{"id": "P1", "params": [{"name": "email"}]}]},
                "sequence_collection": {"peptides": [{"id": "PEP_1", "sequence": "PEPTIDE"}]}
            }"#,
        )
        .unwrap();
        let audit = doc.audit_collection.as_ref().unwrap();
        assert_eq!(audit.persons[0].id, "P1");
        assert!(audit.persons[0].affiliations.is_empty());
        assert_eq!(audit.persons[0].params[0].name, "email");
        assert!(!audit.persons[0].params[0].is_controlled());

        let sequences = doc.sequence_collection.as_ref().unwrap();
        assert_eq!(sequences.peptides[0], Peptide::new("PEP_1", "PEPTIDE"));
        assert!(sequences.db_sequences.is_empty());
    }

    #[test]
    fn test_section_order_is_declaration_order() {
        let mut all: Vec<_> = DocumentSection::HEADER.to_vec();
        all.push(DocumentSection::Inputs);
        all.extend(DocumentSection::ANALYSIS_DATA);
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted);
    }
}
