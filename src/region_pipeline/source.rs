//! Region source module
//!
//! Read-only access to an on-disk 2D dataset: the immutable layout that
//! addresses it, rectangular region extraction, and the metadata providers
//! that locate a dataset and describe its layout.

mod extract;
mod reader;
pub mod provider;
pub mod types;

pub use extract::extract;
pub use provider::{BlueHeaderProvider, FilenameConventionProvider, MetadataProvider};
pub use reader::RegionReader;
pub use types::{DataSource, Region, SampleMatrix, SourceLayout};
