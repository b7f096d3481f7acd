//! OCGA to Akoma Ntoso - Convert the Official Code of Georgia Annotated.
//!
//! This crate reads the OCGA archive (one XML file per title, section text
//! stored as escaped HTML) and writes one Akoma Ntoso 3.0 document per title,
//! with sections split into subsections and paragraphs.
//!
//! # Example
//!
//! ```
//! use ocga_akn::{parse_subsections, config};
//!
//! let body = parse_subsections("Intro. (a) First. (1) One. (b) Second.");
//! assert_eq!(body.intro, "Intro.");
//! assert_eq!(body.subsections.len(), 2);
//! assert_eq!(config::output_file_name(7), "us-ga-title-07.akn.xml");
//! ```
//!
//! # Architecture
//!
//! The converter is organized into several modules:
//!
//! - [`config`]: Constants, file naming and title number validation
//! - [`types`]: Core data types (SourceEntry, SectionRecord, SubsectionNode)
//! - [`error`]: Error types and Result alias
//! - [`text`]: HTML content normalization and entity decoding
//! - [`splitting`]: Subsection and paragraph parsing
//! - [`xml`]: Source XML utilities
//! - [`source`]: Section extraction from title files
//! - [`akn`]: Akoma Ntoso tree building and writing
//! - [`converter`]: Per-title and batch conversion
//! - [`cli`]: Command-line interface

pub mod akn;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod source;
pub mod splitting;
pub mod text;
pub mod types;
pub mod xml;

// Re-export main functions
pub use converter::{convert_directory, convert_title, BatchReport, TitleOutcome};

// Re-export commonly used items
pub use error::{error_chain, ConverterError, Result};
pub use source::{extract_section_number, parse_source};
pub use splitting::parse_subsections;
pub use text::clean_html_content;
pub use types::{SectionRecord, SourceEntry, SubsectionNode};
