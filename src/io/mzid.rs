//! Implements a writer for the HUPO-PSI mzIdentML XML format for
//! representing peptide and protein identification results.

pub mod marshaller;
pub mod writer;

pub use crate::io::mzid::marshaller::{
    CreationDate, MarshalError, MarshalResult, Marshaller, XMLMarshaller,
};

pub use crate::io::mzid::writer::{
    failure_diagnostic, header_slots, write_mzidentml, MzIdentMLWriter, MzIdentMLWriterBuilder,
    MzIdentMLWriterError, MzIdentMLWriterState, MzIdentMLWriterType, PresenceCheck, SectionSlot,
    WriterResult,
};
