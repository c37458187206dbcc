//! `mzident` writes peptide and protein identification results in the HUPO-PSI
//! mzIdentML format.
//!
//! Build up a [`MzIdentMLDocument`] with whichever sections you have, then hand it
//! to [`write_mzidentml`] or a configured [`MzIdentMLWriterBuilder`]:
//!
//! ```no_run
//! use mzident::document::{CvList, MzIdentMLDocument, MzIdentMLVersion};
//! use mzident::io::MzIdentMLWriterBuilder;
//!
//! let mut doc = MzIdentMLDocument::new(MzIdentMLVersion::V1_2_0);
//! doc.cv_list = Some(CvList::with_defaults());
//!
//! MzIdentMLWriterBuilder::new()
//!     .with_document_id("example")
//!     .write_path("example.mzid", &doc)?;
//! # Ok::<(), mzident::io::MzIdentMLWriterError>(())
//! ```
pub mod document;
pub mod io;
pub mod params;

pub use crate::document::{DocumentSection, MzIdentMLDocument, MzIdentMLVersion, SectionRef};
pub use crate::io::mzid::{write_mzidentml, MzIdentMLWriter, MzIdentMLWriterBuilder};
pub use crate::params::{ControlledVocabulary, Param, ParamDescribed, ParamLike};
