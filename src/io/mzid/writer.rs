use std::fmt::{Debug, Display};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, error, trace, warn};
use thiserror::Error;

use super::marshaller::{CreationDate, MarshalError, Marshaller, XMLMarshaller};
use crate::document::{DocumentSection, MzIdentMLDocument};

const BUFFER_SIZE: usize = 10000;

/// The `id` given to the root `MzIdentML` element unless one is configured
pub const DEFAULT_DOCUMENT_ID: &str = "12345";

pub const COMMON_ERRORS_URL: &str = "https://code.google.com/p/mzidentml-lib/wiki/CommonErrors";

const TASK_NAME: &str = "write";
const COMPONENT_NAME: &str = "MzIdentMLWriter";

/// Format the diagnostic message reported when writing a document fails.
///
/// Existing tooling scrapes logs for this exact text, trailing space included.
pub fn failure_diagnostic(task: &str, component: &str, cause: &dyn Display) -> String {
    format!(
        "The task \"{task}\" in the class \"{component}\" was not completed because of {cause}.\
         \nPlease see the reference guide at 02 for more information on this error. \
         {COMMON_ERRORS_URL} "
    )
}

/**
The stages [`MzIdentMLWriterType`] passes through while writing a document.
When a write fails, the error carries the stage that was being written.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MzIdentMLWriterState {
    Start,
    Header,
    DocumentOpen,
    Section(DocumentSection),
    DataCollection,
    AnalysisData,
    AnalysisDataClosed,
    DataCollectionClosed,
    MzIdentMLClosed,
    End,
}

#[derive(Debug, Error)]
pub enum MzIdentMLWriterError {
    #[error("{message}")]
    DestinationUnavailable {
        path: PathBuf,
        message: String,
        #[source]
        source: io::Error,
    },
    #[error("{message}")]
    IOFailure {
        state: MzIdentMLWriterState,
        message: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to marshal {section}: {source}")]
    MarshalFailure {
        state: MzIdentMLWriterState,
        section: DocumentSection,
        #[source]
        source: MarshalError,
    },
    #[error("Cannot write a document while in state {0:?}")]
    InvalidActionError(MzIdentMLWriterState),
}

impl MzIdentMLWriterError {
    pub fn destination_unavailable(path: &Path, source: io::Error) -> Self {
        let message = failure_diagnostic(TASK_NAME, COMPONENT_NAME, &source);
        Self::DestinationUnavailable {
            path: path.to_path_buf(),
            message,
            source,
        }
    }

    pub fn io_failure(state: MzIdentMLWriterState, source: io::Error) -> Self {
        let message = failure_diagnostic(TASK_NAME, COMPONENT_NAME, &source);
        Self::IOFailure {
            state,
            message,
            source,
        }
    }

    fn from_marshal(
        state: MzIdentMLWriterState,
        section: DocumentSection,
        source: MarshalError,
    ) -> Self {
        match source {
            MarshalError::IOError(err) => Self::io_failure(state, err),
            source => Self::MarshalFailure {
                state,
                section,
                source,
            },
        }
    }

    /// The stage the writer had reached, if the failure happened mid-document
    pub fn state(&self) -> Option<MzIdentMLWriterState> {
        match self {
            Self::DestinationUnavailable { .. } => None,
            Self::IOFailure { state, .. } => Some(*state),
            Self::MarshalFailure { state, .. } => Some(*state),
            Self::InvalidActionError(state) => Some(*state),
        }
    }
}

pub type WriterResult = Result<(), MzIdentMLWriterError>;

/// How the writer decides whether the sample collection slot is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresenceCheck {
    /// Every section is emitted based on its own presence
    #[default]
    Corrected,
    /// Reproduce historical output: the software list is emitted when the
    /// *sample collection* is present, and is dropped otherwise.
    Legacy,
}

/// One entry of the emission order: `emits` is written when `presence` is set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSlot {
    pub presence: DocumentSection,
    pub emits: DocumentSection,
}

impl SectionSlot {
    pub const fn new(section: DocumentSection) -> Self {
        Self {
            presence: section,
            emits: section,
        }
    }
}

/// The ordered slots preceding `DataCollection`
pub fn header_slots(check: PresenceCheck) -> [SectionSlot; 8] {
    let mut slots = DocumentSection::HEADER.map(SectionSlot::new);
    if check == PresenceCheck::Legacy {
        slots[1].presence = DocumentSection::AnalysisSampleCollection;
    }
    slots
}

/**
Writes a [`MzIdentMLDocument`] to a [`std::io::Write`]-able stream, delegating
each section's serialization to a [`Marshaller`].

The writer emits the top-level sections in schema order, skipping absent
ones, and always writes the `DataCollection` and `AnalysisData` wrappers. A
writer produces exactly one document.
*/
pub struct MzIdentMLWriterType<W: Write, M: Marshaller = XMLMarshaller> {
    /// The `id` attribute of the root element
    pub document_id: String,
    pub presence_check: PresenceCheck,
    pub state: MzIdentMLWriterState,
    handle: W,
    marshaller: M,
}

impl<W: Write, M: Marshaller + Debug> Debug for MzIdentMLWriterType<W, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MzIdentMLWriterType")
            .field("document_id", &self.document_id)
            .field("presence_check", &self.presence_check)
            .field("state", &self.state)
            .field("handle", &"...")
            .field("marshaller", &self.marshaller)
            .finish()
    }
}

/// A specialization of [`MzIdentMLWriterType`] for the default marshaller, for common use.
pub type MzIdentMLWriter<W> = MzIdentMLWriterType<W, XMLMarshaller>;

impl<W: Write> MzIdentMLWriterType<W, XMLMarshaller> {
    /// Wrap a new [`std::io::Write`]-able type with the default settings
    pub fn new(handle: W) -> Self {
        Self::with_marshaller(handle, XMLMarshaller::default())
    }
}

impl<W: Write, M: Marshaller> MzIdentMLWriterType<W, M> {
    pub fn with_marshaller(handle: W, marshaller: M) -> Self {
        Self {
            document_id: DEFAULT_DOCUMENT_ID.to_string(),
            presence_check: PresenceCheck::default(),
            state: MzIdentMLWriterState::Start,
            handle,
            marshaller,
        }
    }

    pub fn marshaller(&self) -> &M {
        &self.marshaller
    }

    pub fn get_ref(&self) -> &W {
        &self.handle
    }

    pub fn into_inner(self) -> W {
        self.handle
    }

    /**
    Write `document` out in full, then flush the stream.

    ## Errors
    Any I/O failure is reported as [`MzIdentMLWriterError::IOFailure`] carrying
    the stage being written, after being logged. Calling this again once a
    document has been written is an [`MzIdentMLWriterError::InvalidActionError`].
    */
    pub fn write_document(&mut self, document: &MzIdentMLDocument) -> WriterResult {
        if self.state != MzIdentMLWriterState::Start {
            let err = MzIdentMLWriterError::InvalidActionError(self.state);
            error!("{err}");
            return Err(err);
        }
        self.marshaller.use_version(document.version);
        let result = self.emit_document(document);
        if let Err(err) = &result {
            error!("{err}");
        }
        result
    }

    fn emit_document(&mut self, document: &MzIdentMLDocument) -> WriterResult {
        let header = self.marshaller.xml_header();
        self.write_tag(&header, MzIdentMLWriterState::Header, true)?;

        let start = self.marshaller.mzidentml_start_tag(&self.document_id);
        self.write_tag(&start, MzIdentMLWriterState::DocumentOpen, true)?;

        for slot in header_slots(self.presence_check) {
            self.emit_slot(document, slot)?;
        }

        let tag = self.marshaller.data_collection_start_tag();
        self.write_tag(&tag, MzIdentMLWriterState::DataCollection, true)?;
        self.emit_slot(document, SectionSlot::new(DocumentSection::Inputs))?;

        let tag = self.marshaller.analysis_data_start_tag();
        self.write_tag(&tag, MzIdentMLWriterState::AnalysisData, true)?;
        for section in DocumentSection::ANALYSIS_DATA {
            self.emit_slot(document, SectionSlot::new(section))?;
        }
        let tag = self.marshaller.analysis_data_closing_tag();
        self.write_tag(&tag, MzIdentMLWriterState::AnalysisDataClosed, true)?;

        let tag = self.marshaller.data_collection_closing_tag();
        self.write_tag(&tag, MzIdentMLWriterState::DataCollectionClosed, true)?;

        let tag = self.marshaller.mzidentml_closing_tag();
        self.write_tag(&tag, MzIdentMLWriterState::MzIdentMLClosed, false)?;

        self.handle
            .flush()
            .map_err(|e| MzIdentMLWriterError::io_failure(self.state, e))?;
        self.state = MzIdentMLWriterState::End;
        Ok(())
    }

    fn write_tag(&mut self, tag: &str, state: MzIdentMLWriterState, newline: bool) -> WriterResult {
        self.state = state;
        self.handle
            .write_all(tag.as_bytes())
            .map_err(|e| MzIdentMLWriterError::io_failure(state, e))?;
        if newline {
            self.handle
                .write_all(b"\n")
                .map_err(|e| MzIdentMLWriterError::io_failure(state, e))?;
        }
        Ok(())
    }

    fn emit_slot(&mut self, document: &MzIdentMLDocument, slot: SectionSlot) -> WriterResult {
        let present = document.has_section(slot.presence);
        let target = document.section(slot.emits);

        if slot.presence != slot.emits {
            match (present, target.is_some()) {
                (false, true) => warn!(
                    "{} is present but omitted, its slot is gated on {}",
                    slot.emits, slot.presence
                ),
                (true, false) => warn!(
                    "{} is present, but its slot emits {} which is absent",
                    slot.presence, slot.emits
                ),
                _ => {}
            }
        }

        let section = match (present, target) {
            (true, Some(section)) => section,
            _ => {
                trace!("Skipping {}", slot.emits);
                return Ok(());
            }
        };

        debug!("Writing {}", slot.emits);
        let state = MzIdentMLWriterState::Section(slot.emits);
        self.state = state;
        self.marshaller
            .marshal(section, &mut self.handle)
            .map_err(|e| MzIdentMLWriterError::from_marshal(state, slot.emits, e))?;
        self.handle
            .write_all(b"\n")
            .map_err(|e| MzIdentMLWriterError::io_failure(state, e))?;
        Ok(())
    }
}

/// Configures and creates [`MzIdentMLWriter`] instances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MzIdentMLWriterBuilder {
    document_id: String,
    presence_check: PresenceCheck,
    creation_date: CreationDate,
    indent: usize,
}

impl Default for MzIdentMLWriterBuilder {
    fn default() -> Self {
        Self {
            document_id: DEFAULT_DOCUMENT_ID.to_string(),
            presence_check: PresenceCheck::default(),
            creation_date: CreationDate::default(),
            indent: XMLMarshaller::INDENT_SIZE,
        }
    }
}

impl MzIdentMLWriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document_id(mut self, document_id: &str) -> Self {
        self.document_id = document_id.to_string();
        self
    }

    pub fn with_presence_check(mut self, presence_check: PresenceCheck) -> Self {
        self.presence_check = presence_check;
        self
    }

    pub fn with_creation_date(mut self, creation_date: NaiveDateTime) -> Self {
        self.creation_date = CreationDate::Fixed(creation_date);
        self
    }

    pub fn without_creation_date(mut self) -> Self {
        self.creation_date = CreationDate::Omit;
        self
    }

    /// The number of spaces to indent nested elements by, 0 to disable
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn marshaller(&self) -> XMLMarshaller {
        XMLMarshaller::default()
            .with_creation_date(self.creation_date)
            .with_indent(self.indent)
    }

    pub fn build<W: Write>(&self, handle: W) -> MzIdentMLWriter<W> {
        let mut writer = MzIdentMLWriterType::with_marshaller(handle, self.marshaller());
        writer.document_id.clone_from(&self.document_id);
        writer.presence_check = self.presence_check;
        writer
    }

    /// Create or truncate the file at `path` and wrap it in a writer
    pub fn create<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<MzIdentMLWriter<BufWriter<fs::File>>, MzIdentMLWriterError> {
        let path = path.as_ref();
        match fs::File::create(path) {
            Ok(file) => Ok(self.build(BufWriter::with_capacity(BUFFER_SIZE, file))),
            Err(e) => {
                let err = MzIdentMLWriterError::destination_unavailable(path, e);
                error!("{err}");
                Err(err)
            }
        }
    }

    pub fn write_path<P: AsRef<Path>>(&self, path: P, document: &MzIdentMLDocument) -> WriterResult {
        let mut writer = self.create(path)?;
        writer.write_document(document)
    }
}

/// Write `document` to the file at `path`, replacing anything already there.
pub fn write_mzidentml<P: AsRef<Path>>(path: P, document: &MzIdentMLDocument) -> WriterResult {
    MzIdentMLWriterBuilder::default().write_path(path, document)
}
