//! Writing identification result file formats.
pub mod mzid;

pub use crate::io::mzid::{
    write_mzidentml, Marshaller, MzIdentMLWriter, MzIdentMLWriterBuilder, MzIdentMLWriterError,
    XMLMarshaller,
};
