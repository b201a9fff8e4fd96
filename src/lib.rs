//! sheetgallery - Pure-Rust Excel/CSV to HTML converter with image thumbnails
//!
//! This crate converts a tabular file (XLSX/XLS spreadsheet or CSV) into a
//! self-contained HTML page. Every cell whose text is an image URL is rendered
//! as an embedded, styled thumbnail; all other cells are shown as plain text.
//!
//! The conversion is a single synchronous pipeline:
//! parse → drop placeholder columns (`Unnamed: 0`, ...) → classify and render
//! cells → assemble the HTML document → (optionally) encode it for download.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetgallery::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // The parser is chosen from the file extension (.xlsx, .xls or .csv)
//!     let document = converter.convert_file("products.csv")?;
//!
//!     std::fs::write("output.html", document.as_str())?;
//!     Ok(())
//! }
//! ```
//!
//! For in-memory conversion, pass any reader together with an [`InputKind`]:
//!
//! ```rust
//! use sheetgallery::{ConverterBuilder, InputKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let csv = "Name,Photo\nAlice,http://x.com/a.png\n";
//! let html = converter.convert_to_string(csv.as_bytes(), InputKind::DelimitedText)?;
//! assert!(html.contains("<img src=\"http://x.com/a.png\""));
//! # Ok(())
//! # }
//! ```
//!
//! # Download Link
//!
//! ```rust
//! use sheetgallery::{ConverterBuilder, InputKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let artifact = converter.export("A\n1\n".as_bytes(), InputKind::DelimitedText)?;
//!
//! // <a href="data:text/html;base64,..." download="output.html">...</a>
//! let link = artifact.download_link();
//! assert!(link.contains("download=\"output.html\""));
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod document;
mod error;
mod export;
mod parser;
mod renderer;
mod sanitizer;
mod security;
mod types;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod wasm;

// 公開API
pub use api::{DateFormat, InputKind, SheetSelector};
pub use builder::{Converter, ConverterBuilder};
pub use document::{DocumentAssembler, PAGE_HEADING, PAGE_TITLE};
pub use error::ProcessingError;
pub use export::{ExportArtifact, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
pub use renderer::{
    is_image_reference, render_cell, render_table, IMAGE_EXTENSIONS, THUMBNAIL_MAX_PX,
};
pub use sanitizer::{ColumnSanitizer, DEFAULT_PLACEHOLDER_PATTERN};
pub use types::{CellValue, Dataset, ImageRef, RenderedCell, RenderedDocument, RenderedTable};
