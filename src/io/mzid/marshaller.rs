use std::fmt::Debug;
use std::io;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Error as XMLError;
use quick_xml::Writer;
use thiserror::Error;

use crate::document::*;
use crate::params::{Param, ParamLike, Unit};

macro_rules! bstart {
    ($e:expr) => {
        BytesStart::new($e)
    };
}

macro_rules! attrib {
    ($name:expr, $value:expr, $elt:ident) => {
        let value: &str = $value.as_ref();
        $elt.push_attribute(($name, value));
    };
}

macro_rules! opt_attrib {
    ($name:expr, $value:expr, $elt:ident) => {
        if let Some(value) = $value.as_ref() {
            let value = value.to_string();
            attrib!($name, value, $elt);
        }
    };
}

macro_rules! start_event {
    ($writer:ident, $target:ident) => {
        $writer.handle.write_event(Event::Start($target.borrow()))?;
    };
}

macro_rules! end_event {
    ($writer:ident, $target:ident) => {
        $writer.handle.write_event(Event::End($target.to_end()))?;
    };
}

/// The format string for `creationDate` and `activityDate` attributes
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Error)]
pub enum MarshalError {
    #[error("{0}")]
    IOError(
        #[from]
        #[source]
        io::Error,
    ),
    #[error("An error occurred while serializing XML: {0}")]
    XMLError(#[source] XMLError),
}

impl From<XMLError> for MarshalError {
    fn from(value: XMLError) -> Self {
        match value {
            XMLError::Io(err) => Self::IOError(
                Arc::try_unwrap(err).unwrap_or_else(|e| io::Error::new(e.kind(), e.to_string())),
            ),
            err => Self::XMLError(err),
        }
    }
}

pub type MarshalResult = Result<(), MarshalError>;

/// Produces the pieces of an mzIdentML document.
///
/// The wrapper tags are returned as strings because the writer is responsible
/// for stitching them together around the marshalled sections. Only
/// [`Marshaller::mzidentml_start_tag`] and [`Marshaller::marshal`] vary between
/// implementations in practice.
pub trait Marshaller {
    /// Called once per document, before anything is written
    fn use_version(&mut self, _version: MzIdentMLVersion) {}

    fn xml_header(&self) -> String {
        XML_HEADER.to_string()
    }

    fn mzidentml_start_tag(&self, id: &str) -> String;

    fn data_collection_start_tag(&self) -> String {
        "<DataCollection>".to_string()
    }

    fn analysis_data_start_tag(&self) -> String {
        "<AnalysisData>".to_string()
    }

    fn analysis_data_closing_tag(&self) -> String {
        "</AnalysisData>".to_string()
    }

    fn data_collection_closing_tag(&self) -> String {
        "</DataCollection>".to_string()
    }

    fn mzidentml_closing_tag(&self) -> String {
        "</MzIdentML>".to_string()
    }

    /// Serialize a single section as an XML fragment, without a trailing newline
    fn marshal(&self, section: SectionRef<'_>, sink: &mut dyn io::Write) -> MarshalResult;
}

/// When to stamp the `creationDate` attribute of the root element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationDate {
    /// The local time when the start tag is created
    #[default]
    Now,
    Fixed(NaiveDateTime),
    Omit,
}

impl CreationDate {
    pub fn resolve(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Now => Some(Local::now().naive_local()),
            Self::Fixed(dt) => Some(*dt),
            Self::Omit => None,
        }
    }
}

/// A [`Marshaller`] that writes the mzIdentML schema with `quick-xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XMLMarshaller {
    pub version: MzIdentMLVersion,
    pub creation_date: CreationDate,
    pub indent: usize,
}

impl Default for XMLMarshaller {
    fn default() -> Self {
        Self::new(MzIdentMLVersion::default())
    }
}

impl XMLMarshaller {
    pub const INDENT_SIZE: usize = 2;

    pub fn new(version: MzIdentMLVersion) -> Self {
        Self {
            version,
            creation_date: CreationDate::default(),
            indent: Self::INDENT_SIZE,
        }
    }

    pub fn with_creation_date(mut self, creation_date: CreationDate) -> Self {
        self.creation_date = creation_date;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl Marshaller for XMLMarshaller {
    fn use_version(&mut self, version: MzIdentMLVersion) {
        self.version = version;
    }

    fn mzidentml_start_tag(&self, id: &str) -> String {
        let mut tag = bstart!("MzIdentML");
        attrib!("id", id, tag);
        attrib!("version", self.version.as_str(), tag);
        attrib!("xmlns", self.version.namespace(), tag);
        attrib!("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance", tag);
        attrib!("xsi:schemaLocation", self.version.schema_location(), tag);
        if let Some(date) = self.creation_date.resolve() {
            let date = date.format(DATE_FORMAT).to_string();
            attrib!("creationDate", date, tag);
        }
        format!("<{}>", String::from_utf8_lossy(&tag))
    }

    fn marshal(&self, section: SectionRef<'_>, sink: &mut dyn io::Write) -> MarshalResult {
        let mut handle = FragmentWriter::new(sink, self.indent);
        match section {
            SectionRef::CvList(s) => handle.write_cv_list(s),
            SectionRef::AnalysisSoftwareList(s) => handle.write_analysis_software_list(s),
            SectionRef::Provider(s) => handle.write_provider(s),
            SectionRef::AuditCollection(s) => handle.write_audit_collection(s),
            SectionRef::AnalysisSampleCollection(s) => handle.write_analysis_sample_collection(s),
            SectionRef::SequenceCollection(s) => handle.write_sequence_collection(s),
            SectionRef::AnalysisCollection(s) => handle.write_analysis_collection(s),
            SectionRef::AnalysisProtocolCollection(s) => {
                handle.write_analysis_protocol_collection(s)
            }
            SectionRef::Inputs(s) => handle.write_inputs(s),
            SectionRef::SpectrumIdentificationList(s) => {
                handle.write_spectrum_identification_list(s)
            }
            SectionRef::ProteinDetectionList(s) => handle.write_protein_detection_list(s),
        }
    }
}

fn residues_attr(residues: &[char]) -> String {
    let mut buf = String::with_capacity(residues.len() * 2);
    for (i, r) in residues.iter().enumerate() {
        if i > 0 {
            buf.push(' ');
        }
        buf.push(*r);
    }
    buf
}

/// Writes one section's worth of events to the sink
struct FragmentWriter<'a> {
    handle: Writer<&'a mut dyn io::Write>,
}

impl Debug for FragmentWriter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentWriter")
            .field("handle", &"...")
            .finish()
    }
}

impl<'a> FragmentWriter<'a> {
    fn new(sink: &'a mut dyn io::Write, indent: usize) -> Self {
        let handle = if indent > 0 {
            Writer::new_with_indent(sink, b' ', indent)
        } else {
            Writer::new(sink)
        };
        Self { handle }
    }

    fn write_param<P: ParamLike>(&mut self, param: &P) -> MarshalResult {
        let mut elt = match (param.curie(), param.controlled_vocabulary()) {
            (Some(accession), Some(cv)) => {
                let mut elt = bstart!("cvParam");
                attrib!("cvRef", cv.cv_ref(), elt);
                attrib!("accession", accession, elt);
                elt
            }
            _ => bstart!("userParam"),
        };

        attrib!("name", param.name(), elt);
        if !param.value().is_empty() {
            attrib!("value", param.value(), elt);
        }
        match param.unit() {
            Unit::Unknown => {}
            unit => {
                let (unit_acc, unit_name) = unit.for_param();
                let mut split = unit_acc.split(':');
                if let Some(prefix) = split.next() {
                    let prefix = if prefix == "MS" { "PSI-MS" } else { prefix };
                    attrib!("unitCvRef", prefix, elt);
                } else {
                    attrib!("unitCvRef", "UO", elt);
                }
                attrib!("unitAccession", unit_acc, elt);
                attrib!("unitName", unit_name, elt);
            }
        }
        self.handle.write_event(Event::Empty(elt))?;
        Ok(())
    }

    fn write_param_list<'b, T: Iterator<Item = &'b Param>>(&mut self, params: T) -> MarshalResult {
        for param in params {
            self.write_param(param)?
        }
        Ok(())
    }

    /// Write `<name>params...</name>`, skipping the element if `params` is empty
    fn write_param_group(&mut self, name: &str, params: &[Param]) -> MarshalResult {
        if params.is_empty() {
            return Ok(());
        }
        let tag = bstart!(name);
        start_event!(self, tag);
        self.write_param_list(params.iter())?;
        end_event!(self, tag);
        Ok(())
    }

    fn write_text_element(&mut self, name: &str, text: &str) -> MarshalResult {
        let tag = bstart!(name);
        start_event!(self, tag);
        self.handle.write_event(Event::Text(BytesText::new(text)))?;
        end_event!(self, tag);
        Ok(())
    }

    fn write_ref(&mut self, name: &str, attr: &str, value: &str) -> MarshalResult {
        let mut tag = bstart!(name);
        attrib!(attr, value, tag);
        self.handle.write_event(Event::Empty(tag))?;
        Ok(())
    }

    fn write_cv_list(&mut self, cv_list: &CvList) -> MarshalResult {
        let outer = bstart!("cvList");
        start_event!(self, outer);
        for cv in cv_list.iter() {
            let mut tag = bstart!("cv");
            attrib!("id", cv.id, tag);
            attrib!("fullName", cv.full_name, tag);
            attrib!("uri", cv.uri, tag);
            opt_attrib!("version", cv.version, tag);
            self.handle.write_event(Event::Empty(tag))?;
        }
        end_event!(self, outer);
        Ok(())
    }

    fn write_contact_role(&mut self, role: &ContactRole) -> MarshalResult {
        let mut tag = bstart!("ContactRole");
        attrib!("contact_ref", role.contact_ref, tag);
        start_event!(self, tag);
        let role_tag = bstart!("Role");
        start_event!(self, role_tag);
        self.write_param(&role.role)?;
        end_event!(self, role_tag);
        end_event!(self, tag);
        Ok(())
    }

    fn write_analysis_software_list(&mut self, software_list: &AnalysisSoftwareList) -> MarshalResult {
        let outer = bstart!("AnalysisSoftwareList");
        start_event!(self, outer);
        for soft in software_list.iter() {
            let mut tag = bstart!("AnalysisSoftware");
            attrib!("id", soft.id, tag);
            opt_attrib!("name", soft.name, tag);
            opt_attrib!("version", soft.version, tag);
            opt_attrib!("uri", soft.uri, tag);
            start_event!(self, tag);
            if let Some(role) = &soft.contact_role {
                self.write_contact_role(role)?;
            }
            if let Some(name) = &soft.software_name {
                let name_tag = bstart!("SoftwareName");
                start_event!(self, name_tag);
                self.write_param(name)?;
                end_event!(self, name_tag);
            }
            if let Some(custom) = &soft.customizations {
                self.write_text_element("Customizations", custom)?;
            }
            self.write_param_list(soft.params.iter())?;
            end_event!(self, tag);
        }
        end_event!(self, outer);
        Ok(())
    }

    fn write_provider(&mut self, provider: &Provider) -> MarshalResult {
        let mut tag = bstart!("Provider");
        attrib!("id", provider.id, tag);
        opt_attrib!("name", provider.name, tag);
        opt_attrib!("analysisSoftware_ref", provider.analysis_software_ref, tag);
        match &provider.contact_role {
            Some(role) => {
                start_event!(self, tag);
                self.write_contact_role(role)?;
                end_event!(self, tag);
            }
            None => {
                self.handle.write_event(Event::Empty(tag))?;
            }
        }
        Ok(())
    }

    fn write_audit_collection(&mut self, audit: &AuditCollection) -> MarshalResult {
        let outer = bstart!("AuditCollection");
        start_event!(self, outer);
        for person in audit.persons.iter() {
            let mut tag = bstart!("Person");
            attrib!("id", person.id, tag);
            opt_attrib!("name", person.name, tag);
            opt_attrib!("firstName", person.first_name, tag);
            opt_attrib!("midInitials", person.mid_initials, tag);
            opt_attrib!("lastName", person.last_name, tag);
            start_event!(self, tag);
            self.write_param_list(person.params.iter())?;
            for aff in person.affiliations.iter() {
                self.write_ref("Affiliation", "organization_ref", &aff.organization_ref)?;
            }
            end_event!(self, tag);
        }
        for org in audit.organizations.iter() {
            let mut tag = bstart!("Organization");
            attrib!("id", org.id, tag);
            opt_attrib!("name", org.name, tag);
            start_event!(self, tag);
            self.write_param_list(org.params.iter())?;
            if let Some(parent) = &org.parent {
                self.write_ref("Parent", "organization_ref", parent)?;
            }
            end_event!(self, tag);
        }
        end_event!(self, outer);
        Ok(())
    }

    fn write_analysis_sample_collection(
        &mut self,
        samples: &AnalysisSampleCollection,
    ) -> MarshalResult {
        let outer = bstart!("AnalysisSampleCollection");
        start_event!(self, outer);
        for sample in samples.samples.iter() {
            let mut tag = bstart!("Sample");
            attrib!("id", sample.id, tag);
            opt_attrib!("name", sample.name, tag);
            start_event!(self, tag);
            for role in sample.contact_roles.iter() {
                self.write_contact_role(role)?;
            }
            for sub in sample.sub_samples.iter() {
                self.write_ref("SubSample", "sample_ref", &sub.sample_ref)?;
            }
            self.write_param_list(sample.params.iter())?;
            end_event!(self, tag);
        }
        end_event!(self, outer);
        Ok(())
    }

    fn write_modification(&mut self, modification: &Modification) -> MarshalResult {
        let mut tag = bstart!("Modification");
        opt_attrib!("location", modification.location, tag);
        if !modification.residues.is_empty() {
            let residues = residues_attr(&modification.residues);
            attrib!("residues", residues, tag);
        }
        opt_attrib!("monoisotopicMassDelta", modification.monoisotopic_mass_delta, tag);
        opt_attrib!("avgMassDelta", modification.average_mass_delta, tag);
        start_event!(self, tag);
        self.write_param_list(modification.params.iter())?;
        end_event!(self, tag);
        Ok(())
    }

    fn write_substitution(&mut self, sub: &SubstitutionModification) -> MarshalResult {
        let mut tag = bstart!("SubstitutionModification");
        let original = sub.original_residue.to_string();
        let replacement = sub.replacement_residue.to_string();
        attrib!("originalResidue", original, tag);
        attrib!("replacementResidue", replacement, tag);
        opt_attrib!("location", sub.location, tag);
        opt_attrib!("monoisotopicMassDelta", sub.monoisotopic_mass_delta, tag);
        opt_attrib!("avgMassDelta", sub.average_mass_delta, tag);
        self.handle.write_event(Event::Empty(tag))?;
        Ok(())
    }

    fn write_sequence_collection(&mut self, sequences: &SequenceCollection) -> MarshalResult {
        let outer = bstart!("SequenceCollection");
        start_event!(self, outer);
        for dbseq in sequences.db_sequences.iter() {
            let mut tag = bstart!("DBSequence");
            attrib!("id", dbseq.id, tag);
            attrib!("accession", dbseq.accession, tag);
            attrib!("searchDatabase_ref", dbseq.search_database_ref, tag);
            opt_attrib!("length", dbseq.length, tag);
            opt_attrib!("name", dbseq.name, tag);
            start_event!(self, tag);
            if let Some(seq) = &dbseq.sequence {
                self.write_text_element("Seq", seq)?;
            }
            self.write_param_list(dbseq.params.iter())?;
            end_event!(self, tag);
        }
        for peptide in sequences.peptides.iter() {
            let mut tag = bstart!("Peptide");
            attrib!("id", peptide.id, tag);
            opt_attrib!("name", peptide.name, tag);
            start_event!(self, tag);
            self.write_text_element("PeptideSequence", &peptide.sequence)?;
            for modification in peptide.modifications.iter() {
                self.write_modification(modification)?;
            }
            for sub in peptide.substitutions.iter() {
                self.write_substitution(sub)?;
            }
            self.write_param_list(peptide.params.iter())?;
            end_event!(self, tag);
        }
        for evidence in sequences.peptide_evidence.iter() {
            let mut tag = bstart!("PeptideEvidence");
            attrib!("id", evidence.id, tag);
            attrib!("dBSequence_ref", evidence.db_sequence_ref, tag);
            attrib!("peptide_ref", evidence.peptide_ref, tag);
            opt_attrib!("start", evidence.start, tag);
            opt_attrib!("end", evidence.end, tag);
            opt_attrib!("pre", evidence.pre, tag);
            opt_attrib!("post", evidence.post, tag);
            let decoy = evidence.is_decoy.to_string();
            attrib!("isDecoy", decoy, tag);
            if evidence.params.is_empty() {
                self.handle.write_event(Event::Empty(tag))?;
            } else {
                start_event!(self, tag);
                self.write_param_list(evidence.params.iter())?;
                end_event!(self, tag);
            }
        }
        end_event!(self, outer);
        Ok(())
    }

    fn write_analysis_collection(&mut self, analyses: &AnalysisCollection) -> MarshalResult {
        let outer = bstart!("AnalysisCollection");
        start_event!(self, outer);
        for ident in analyses.spectrum_identifications.iter() {
            let mut tag = bstart!("SpectrumIdentification");
            attrib!("id", ident.id, tag);
            opt_attrib!("name", ident.name, tag);
            attrib!(
                "spectrumIdentificationProtocol_ref",
                ident.spectrum_identification_protocol_ref,
                tag
            );
            attrib!(
                "spectrumIdentificationList_ref",
                ident.spectrum_identification_list_ref,
                tag
            );
            if let Some(date) = &ident.activity_date {
                let date = date.format(DATE_FORMAT).to_string();
                attrib!("activityDate", date, tag);
            }
            start_event!(self, tag);
            for spectra in ident.input_spectra.iter() {
                self.write_ref("InputSpectra", "spectraData_ref", spectra)?;
            }
            for db in ident.search_database_refs.iter() {
                self.write_ref("SearchDatabaseRef", "searchDatabase_ref", db)?;
            }
            end_event!(self, tag);
        }
        if let Some(detection) = &analyses.protein_detection {
            let mut tag = bstart!("ProteinDetection");
            attrib!("id", detection.id, tag);
            opt_attrib!("name", detection.name, tag);
            attrib!(
                "proteinDetectionProtocol_ref",
                detection.protein_detection_protocol_ref,
                tag
            );
            attrib!(
                "proteinDetectionList_ref",
                detection.protein_detection_list_ref,
                tag
            );
            if let Some(date) = &detection.activity_date {
                let date = date.format(DATE_FORMAT).to_string();
                attrib!("activityDate", date, tag);
            }
            start_event!(self, tag);
            for list_ref in detection.input_spectrum_identifications.iter() {
                self.write_ref(
                    "InputSpectrumIdentifications",
                    "spectrumIdentificationList_ref",
                    list_ref,
                )?;
            }
            end_event!(self, tag);
        }
        end_event!(self, outer);
        Ok(())
    }

    fn write_search_modification(&mut self, modification: &SearchModification) -> MarshalResult {
        let mut tag = bstart!("SearchModification");
        let fixed = modification.fixed_mod.to_string();
        attrib!("fixedMod", fixed, tag);
        let mass_delta = modification.mass_delta.to_string();
        attrib!("massDelta", mass_delta, tag);
        let residues = residues_attr(&modification.residues);
        attrib!("residues", residues, tag);
        start_event!(self, tag);
        self.write_param_list(modification.params.iter())?;
        end_event!(self, tag);
        Ok(())
    }

    fn write_enzyme(&mut self, enzyme: &Enzyme) -> MarshalResult {
        let mut tag = bstart!("Enzyme");
        attrib!("id", enzyme.id, tag);
        opt_attrib!("name", enzyme.name, tag);
        opt_attrib!("missedCleavages", enzyme.missed_cleavages, tag);
        opt_attrib!("semiSpecific", enzyme.semi_specific, tag);
        start_event!(self, tag);
        if let Some(site) = &enzyme.site_regexp {
            self.write_text_element("SiteRegexp", site)?;
        }
        self.write_param_group("EnzymeName", &enzyme.enzyme_name)?;
        end_event!(self, tag);
        Ok(())
    }

    fn write_spectrum_identification_protocol(
        &mut self,
        protocol: &SpectrumIdentificationProtocol,
    ) -> MarshalResult {
        let mut tag = bstart!("SpectrumIdentificationProtocol");
        attrib!("id", protocol.id, tag);
        opt_attrib!("name", protocol.name, tag);
        attrib!("analysisSoftware_ref", protocol.analysis_software_ref, tag);
        start_event!(self, tag);

        let search_type = bstart!("SearchType");
        start_event!(self, search_type);
        self.write_param(&protocol.search_type)?;
        end_event!(self, search_type);

        self.write_param_group("AdditionalSearchParams", &protocol.additional_search_params)?;

        if !protocol.modifications.is_empty() {
            let mods = bstart!("ModificationParams");
            start_event!(self, mods);
            for modification in protocol.modifications.iter() {
                self.write_search_modification(modification)?;
            }
            end_event!(self, mods);
        }

        if !protocol.enzymes.is_empty() {
            let enzymes = bstart!("Enzymes");
            start_event!(self, enzymes);
            for enzyme in protocol.enzymes.iter() {
                self.write_enzyme(enzyme)?;
            }
            end_event!(self, enzymes);
        }

        self.write_param_group("FragmentTolerance", &protocol.fragment_tolerance)?;
        self.write_param_group("ParentTolerance", &protocol.parent_tolerance)?;

        // Threshold is mandatory, fall back to an explicit "no threshold"
        let threshold = bstart!("Threshold");
        start_event!(self, threshold);
        if protocol.threshold.is_empty() {
            self.write_param(&no_threshold())?;
        } else {
            self.write_param_list(protocol.threshold.iter())?;
        }
        end_event!(self, threshold);

        end_event!(self, tag);
        Ok(())
    }

    fn write_protein_detection_protocol(
        &mut self,
        protocol: &ProteinDetectionProtocol,
    ) -> MarshalResult {
        let mut tag = bstart!("ProteinDetectionProtocol");
        attrib!("id", protocol.id, tag);
        opt_attrib!("name", protocol.name, tag);
        attrib!("analysisSoftware_ref", protocol.analysis_software_ref, tag);
        start_event!(self, tag);
        self.write_param_group("AnalysisParams", &protocol.analysis_params)?;
        let threshold = bstart!("Threshold");
        start_event!(self, threshold);
        if protocol.threshold.is_empty() {
            self.write_param(&no_threshold())?;
        } else {
            self.write_param_list(protocol.threshold.iter())?;
        }
        end_event!(self, threshold);
        end_event!(self, tag);
        Ok(())
    }

    fn write_analysis_protocol_collection(
        &mut self,
        protocols: &AnalysisProtocolCollection,
    ) -> MarshalResult {
        let outer = bstart!("AnalysisProtocolCollection");
        start_event!(self, outer);
        for protocol in protocols.spectrum_identification_protocols.iter() {
            self.write_spectrum_identification_protocol(protocol)?;
        }
        if let Some(protocol) = &protocols.protein_detection_protocol {
            self.write_protein_detection_protocol(protocol)?;
        }
        end_event!(self, outer);
        Ok(())
    }

    fn write_file_format(&mut self, file_format: &Option<Param>) -> MarshalResult {
        if let Some(param) = file_format {
            let tag = bstart!("FileFormat");
            start_event!(self, tag);
            self.write_param(param)?;
            end_event!(self, tag);
        }
        Ok(())
    }

    fn write_inputs(&mut self, inputs: &Inputs) -> MarshalResult {
        let outer = bstart!("Inputs");
        start_event!(self, outer);
        for source in inputs.source_files.iter() {
            let mut tag = bstart!("SourceFile");
            attrib!("id", source.id, tag);
            attrib!("location", source.location, tag);
            opt_attrib!("name", source.name, tag);
            start_event!(self, tag);
            self.write_file_format(&source.file_format)?;
            self.write_param_list(source.params.iter())?;
            end_event!(self, tag);
        }
        for db in inputs.search_databases.iter() {
            let mut tag = bstart!("SearchDatabase");
            attrib!("id", db.id, tag);
            attrib!("location", db.location, tag);
            opt_attrib!("name", db.name, tag);
            opt_attrib!("version", db.version, tag);
            opt_attrib!("numDatabaseSequences", db.num_database_sequences, tag);
            start_event!(self, tag);
            self.write_file_format(&db.file_format)?;
            let name_tag = bstart!("DatabaseName");
            start_event!(self, name_tag);
            self.write_param(&db.database_name)?;
            end_event!(self, name_tag);
            self.write_param_list(db.params.iter())?;
            end_event!(self, tag);
        }
        for spectra in inputs.spectra_data.iter() {
            let mut tag = bstart!("SpectraData");
            attrib!("id", spectra.id, tag);
            attrib!("location", spectra.location, tag);
            opt_attrib!("name", spectra.name, tag);
            start_event!(self, tag);
            self.write_file_format(&spectra.file_format)?;
            let id_format = bstart!("SpectrumIDFormat");
            start_event!(self, id_format);
            self.write_param(&spectra.spectrum_id_format)?;
            end_event!(self, id_format);
            end_event!(self, tag);
        }
        end_event!(self, outer);
        Ok(())
    }

    fn write_spectrum_identification_item(
        &mut self,
        item: &SpectrumIdentificationItem,
    ) -> MarshalResult {
        let mut tag = bstart!("SpectrumIdentificationItem");
        attrib!("id", item.id, tag);
        opt_attrib!("name", item.name, tag);
        let charge = item.charge_state.to_string();
        attrib!("chargeState", charge, tag);
        let exp_mz = item.experimental_mass_to_charge.to_string();
        attrib!("experimentalMassToCharge", exp_mz, tag);
        opt_attrib!("calculatedMassToCharge", item.calculated_mass_to_charge, tag);
        opt_attrib!("calculatedPI", item.calculated_pi, tag);
        opt_attrib!("peptide_ref", item.peptide_ref, tag);
        let rank = item.rank.to_string();
        attrib!("rank", rank, tag);
        let pass = item.pass_threshold.to_string();
        attrib!("passThreshold", pass, tag);
        opt_attrib!("sample_ref", item.sample_ref, tag);
        start_event!(self, tag);
        for evidence in item.peptide_evidence_refs.iter() {
            self.write_ref("PeptideEvidenceRef", "peptideEvidence_ref", evidence)?;
        }
        self.write_param_list(item.params.iter())?;
        end_event!(self, tag);
        Ok(())
    }

    fn write_spectrum_identification_list(
        &mut self,
        list: &SpectrumIdentificationList,
    ) -> MarshalResult {
        let mut outer = bstart!("SpectrumIdentificationList");
        attrib!("id", list.id, outer);
        opt_attrib!("name", list.name, outer);
        opt_attrib!("numSequencesSearched", list.num_sequences_searched, outer);
        start_event!(self, outer);
        for result in list.iter() {
            let mut tag = bstart!("SpectrumIdentificationResult");
            attrib!("id", result.id, tag);
            opt_attrib!("name", result.name, tag);
            attrib!("spectrumID", result.spectrum_id, tag);
            attrib!("spectraData_ref", result.spectra_data_ref, tag);
            start_event!(self, tag);
            for item in result.items.iter() {
                self.write_spectrum_identification_item(item)?;
            }
            self.write_param_list(result.params.iter())?;
            end_event!(self, tag);
        }
        self.write_param_list(list.params.iter())?;
        end_event!(self, outer);
        Ok(())
    }

    fn write_protein_detection_hypothesis(
        &mut self,
        hypothesis: &ProteinDetectionHypothesis,
    ) -> MarshalResult {
        let mut tag = bstart!("ProteinDetectionHypothesis");
        attrib!("id", hypothesis.id, tag);
        opt_attrib!("name", hypothesis.name, tag);
        opt_attrib!("dBSequence_ref", hypothesis.db_sequence_ref, tag);
        let pass = hypothesis.pass_threshold.to_string();
        attrib!("passThreshold", pass, tag);
        start_event!(self, tag);
        for peptide in hypothesis.peptide_hypotheses.iter() {
            let mut ph = bstart!("PeptideHypothesis");
            attrib!("peptideEvidence_ref", peptide.peptide_evidence_ref, ph);
            start_event!(self, ph);
            for item_ref in peptide.spectrum_identification_item_refs.iter() {
                self.write_ref(
                    "SpectrumIdentificationItemRef",
                    "spectrumIdentificationItem_ref",
                    item_ref,
                )?;
            }
            end_event!(self, ph);
        }
        self.write_param_list(hypothesis.params.iter())?;
        end_event!(self, tag);
        Ok(())
    }

    fn write_protein_detection_list(&mut self, list: &ProteinDetectionList) -> MarshalResult {
        let mut outer = bstart!("ProteinDetectionList");
        attrib!("id", list.id, outer);
        opt_attrib!("name", list.name, outer);
        start_event!(self, outer);
        for group in list.groups.iter() {
            let mut tag = bstart!("ProteinAmbiguityGroup");
            attrib!("id", group.id, tag);
            opt_attrib!("name", group.name, tag);
            start_event!(self, tag);
            for hypothesis in group.hypotheses.iter() {
                self.write_protein_detection_hypothesis(hypothesis)?;
            }
            self.write_param_list(group.params.iter())?;
            end_event!(self, tag);
        }
        self.write_param_list(list.params.iter())?;
        end_event!(self, outer);
        Ok(())
    }
}

fn no_threshold() -> Param {
    crate::params::ControlledVocabulary::MS.param("MS:1001494", "no threshold")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::params::ControlledVocabulary;
    use chrono::NaiveDate;

    fn render(section: SectionRef<'_>) -> String {
        let marshaller = XMLMarshaller::default();
        let mut buf: Vec<u8> = Vec::new();
        marshaller.marshal(section, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_start_tag() {
        let date = NaiveDate::from_ymd_opt(2017, 8, 23)
            .unwrap()
            .and_hms_opt(14, 24, 47)
            .unwrap();
        let marshaller =
            XMLMarshaller::new(MzIdentMLVersion::V1_2_0).with_creation_date(CreationDate::Fixed(date));
        let tag = marshaller.mzidentml_start_tag("12345");
        assert_eq!(
            tag,
            concat!(
                r#"<MzIdentML id="12345" version="1.2.0" "#,
                r#"xmlns="http://psidev.info/psi/pi/mzIdentML/1.2" "#,
                r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
                r#"xsi:schemaLocation="http://psidev.info/psi/pi/mzIdentML/1.2 http://psidev.info/files/mzIdentML1.2.0.xsd" "#,
                r#"creationDate="2017-08-23T14:24:47">"#
            )
        );

        let marshaller = XMLMarshaller::default().with_creation_date(CreationDate::Omit);
        let tag = marshaller.mzidentml_start_tag("a<b");
        assert!(tag.starts_with(r#"<MzIdentML id="a&lt;b" version="1.1.0""#));
        assert!(!tag.contains("creationDate"));
    }

    #[test]
    fn test_wrapper_tags() {
        let marshaller = XMLMarshaller::default();
        assert_eq!(marshaller.xml_header(), r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(marshaller.data_collection_start_tag(), "<DataCollection>");
        assert_eq!(marshaller.analysis_data_start_tag(), "<AnalysisData>");
        assert_eq!(marshaller.analysis_data_closing_tag(), "</AnalysisData>");
        assert_eq!(marshaller.data_collection_closing_tag(), "</DataCollection>");
        assert_eq!(marshaller.mzidentml_closing_tag(), "</MzIdentML>");
    }

    #[test]
    fn test_cv_list() {
        let cv_list = CvList {
            cvs: vec![Cv::new("UO", "UNIT-ONTOLOGY", "http://example.org/uo.obo", None)],
        };
        let text = render(SectionRef::CvList(&cv_list));
        assert_eq!(
            text,
            "<cvList>\n  <cv id=\"UO\" fullName=\"UNIT-ONTOLOGY\" uri=\"http://example.org/uo.obo\"/>\n</cvList>"
        );
    }

    #[test]
    fn test_params() {
        let mut item = SpectrumIdentificationItem {
            id: "SII_1_1".into(),
            charge_state: 2,
            experimental_mass_to_charge: 500.5,
            peptide_ref: Some("PEP_1".into()),
            rank: 1,
            pass_threshold: true,
            peptide_evidence_refs: vec!["PE_1".into()],
            ..Default::default()
        };
        item.params.push(
            ControlledVocabulary::MS.param_val("MS:1002052", "MS-GF:SpecEValue", "1.5e-10"),
        );
        item.params.push(Param::new_key_value("IsotopeError", 0));
        let list = SpectrumIdentificationList {
            id: "SIL_1".into(),
            results: vec![SpectrumIdentificationResult {
                id: "SIR_1".into(),
                spectrum_id: "index=0".into(),
                spectra_data_ref: "SD_1".into(),
                items: vec![item],
                ..Default::default()
            }],
            ..Default::default()
        };
        let text = render(SectionRef::SpectrumIdentificationList(&list));
        assert!(text.starts_with("<SpectrumIdentificationList id=\"SIL_1\">"));
        assert!(text.contains(
            r#"<SpectrumIdentificationItem id="SII_1_1" chargeState="2" experimentalMassToCharge="500.5" peptide_ref="PEP_1" rank="1" passThreshold="true">"#
        ));
        assert!(text.contains(r#"<PeptideEvidenceRef peptideEvidence_ref="PE_1"/>"#));
        assert!(text.contains(
            r#"<cvParam cvRef="PSI-MS" accession="MS:1002052" name="MS-GF:SpecEValue" value="1.5e-10"/>"#
        ));
        assert!(text.contains(r#"<userParam name="IsotopeError" value="0"/>"#));
        assert!(text.ends_with("</SpectrumIdentificationList>"));
    }

    #[test]
    fn test_unknown_vocabulary_is_user_param() {
        let provider = Provider {
            id: "PROVIDER".into(),
            contact_role: Some(ContactRole {
                contact_ref: "PERSON_1".into(),
                role: ControlledVocabulary::Unknown.param("FOO:12", "bar"),
            }),
            ..Default::default()
        };
        let text = render(SectionRef::Provider(&provider));
        assert!(text.contains(r#"<userParam name="bar"/>"#), "{text}");
        assert!(!text.contains("cvRef=\"\""));
    }

    #[test]
    fn test_units_and_escaping() {
        let protocol = AnalysisProtocolCollection {
            spectrum_identification_protocols: vec![SpectrumIdentificationProtocol {
                id: "SIP_1".into(),
                analysis_software_ref: "AS_1".into(),
                search_type: ControlledVocabulary::MS.param("MS:1001083", "ms-ms search"),
                parent_tolerance: vec![ControlledVocabulary::MS
                    .param_val("MS:1001412", "search tolerance plus value", 10)
                    .with_unit_t(&Unit::PartsPerMillion)],
                enzymes: vec![Enzyme {
                    id: "Tryp".into(),
                    site_regexp: Some("(?<=[KR])(?!P)".into()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            protein_detection_protocol: None,
        };
        let text = render(SectionRef::AnalysisProtocolCollection(&protocol));
        assert!(text.contains(
            r#"unitCvRef="UO" unitAccession="UO:0000169" unitName="parts per million"/>"#
        ));
        assert!(text.contains("<SiteRegexp>(?&lt;=[KR])(?!P)</SiteRegexp>"));
        assert!(text.contains(r#"accession="MS:1001494" name="no threshold""#));
        assert!(!text.contains("ModificationParams"));
    }

    #[test]
    fn test_sequence_collection() {
        let mut peptide = Peptide::new("PEP_1", "PEPTIDEM");
        peptide.modifications.push(Modification {
            location: Some(8),
            monoisotopic_mass_delta: Some(15.994915),
            residues: vec!['M'],
            params: vec![ControlledVocabulary::UNIMOD.param("UNIMOD:35", "Oxidation")],
            ..Default::default()
        });
        let sequences = SequenceCollection {
            db_sequences: vec![DBSequence {
                id: "DBSeq_1".into(),
                accession: "P12345".into(),
                search_database_ref: "SDB_1".into(),
                length: Some(8),
                sequence: Some("PEPTIDEM".into()),
                ..Default::default()
            }],
            peptides: vec![peptide],
            peptide_evidence: vec![PeptideEvidence {
                id: "PE_1".into(),
                db_sequence_ref: "DBSeq_1".into(),
                peptide_ref: "PEP_1".into(),
                start: Some(1),
                end: Some(8),
                pre: Some('-'),
                post: Some('-'),
                ..Default::default()
            }],
        };
        let text = render(SectionRef::SequenceCollection(&sequences));
        assert!(text.contains(
            r#"<DBSequence id="DBSeq_1" accession="P12345" searchDatabase_ref="SDB_1" length="8">"#
        ));
        assert!(text.contains("<Seq>PEPTIDEM</Seq>"));
        assert!(text.contains("<PeptideSequence>PEPTIDEM</PeptideSequence>"));
        assert!(text.contains(
            r#"<Modification location="8" residues="M" monoisotopicMassDelta="15.994915">"#
        ));
        assert!(text.contains(r#"<cvParam cvRef="UNIMOD" accession="UNIMOD:35" name="Oxidation"/>"#));
        assert!(text.contains(
            r#"<PeptideEvidence id="PE_1" dBSequence_ref="DBSeq_1" peptide_ref="PEP_1" start="1" end="8" pre="-" post="-" isDecoy="false"/>"#
        ));
    }

    #[test]
    fn test_unindented() {
        let provider = Provider {
            id: "PROVIDER".into(),
            contact_role: Some(ContactRole {
                contact_ref: "PERSON_DOC_OWNER".into(),
                role: ControlledVocabulary::MS.param("MS:1001271", "researcher"),
            }),
            ..Default::default()
        };
        let marshaller = XMLMarshaller::default().with_indent(0);
        let mut buf = Vec::new();
        marshaller
            .marshal(SectionRef::Provider(&provider), &mut buf)
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            concat!(
                r#"<Provider id="PROVIDER"><ContactRole contact_ref="PERSON_DOC_OWNER"><Role>"#,
                r#"<cvParam cvRef="PSI-MS" accession="MS:1001271" name="researcher"/>"#,
                r#"</Role></ContactRole></Provider>"#
            )
        );
    }
}
