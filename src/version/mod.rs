//! Version discovery and ordering for `check`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ IndexScanner│────▶│   compare   │────▶│  selector   │
//! │ (fetch+regex│     │ (loose sort)│     │ (new since) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`index`]: Fetches an index page and extracts candidate versions
//! - [`compare`]: Loose dotted-numeric version ordering
//! - [`selector`]: Picks the versions newer than the caller's current one
//! - [`template`]: `{field}` substitution used for URIs and file names
//! - [`types`]: `Version`, metadata and response types

pub mod compare;
pub mod index;
pub mod selector;
pub mod template;
pub mod types;
