//! Moving a single file between the remote URI and a local directory

pub mod download;
pub mod upload;

pub use download::download;
pub use upload::{UploadTarget, upload};
