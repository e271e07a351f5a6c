//! # PDF Atlas
//!
//! Document spatial-text indexing and scan-geometry utilities for
//! document-understanding pipelines.
//!
//! ## Core Features
//!
//! ### Spatial-Text Index
//! - **One-pass construction**: every page is walked once at open time;
//!   each text span is kept as `(text, bbox, page_number)`, sorted by
//!   vertical position within its page
//! - **Text Queries**: substring page search, exact-text bounding-box
//!   lookup, per-page attribute listing
//! - **Page Resources**: raw image-resource listing from a re-serialized
//!   secondary view, interactive form-field extraction
//! - **Engine Agnostic**: consumes any PDF engine implementing
//!   [`PdfEngine`]; ships no parser of its own
//!
//! ### Region Geometry
//! - **Object Extraction**: padded labeled crops, embedded-image decoding
//!   with alpha-mask flattening, standard-layout footer trimming
//! - **Bounding Boxes**: page-relative padding, inclusive-pixel
//!   intersection-over-union
//! - **Skew Pipeline**: projection-profile skew estimation, parallel
//!   document-level reduction, bicubic skew correction
//! - **Template Matching**: normalized cross-correlation with an
//!   all-cells acceptance rule
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_atlas::{SpatialTextIndex, intersection_over_union};
//!
//! # fn main() -> pdf_atlas::Result<()> {
//! // Open a document through your engine front-end
//! let index = SpatialTextIndex::<MyEngine>::open("form.pdf")?;
//!
//! // Which pages mention an account number?
//! let pages = index.find_page_by_text("MIL4970933");
//!
//! // Where exactly does the label sit on page 0?
//! let boxes = index.get_bbox_by_text("Policy Number", Some(0));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometric primitives
pub mod geometry;

// External PDF engine boundary
pub mod engine;

// The document spatial-text index
pub mod index;

// Region extraction and decoding
pub mod extract;

// Skew estimation and correction
pub mod skew;

// Template matching
pub mod matching;

pub use engine::PdfEngine;
pub use error::{Error, Result};
pub use extract::ExtractedObject;
pub use geometry::{apply_bbox_padding, intersection_over_union, BoundingBox};
pub use index::{FormFields, SpatialTextIndex, TextSpan};
pub use matching::match_template;
pub use skew::{estimate_document_skew, estimate_skew_angle, rotate_to_correct_skew};
