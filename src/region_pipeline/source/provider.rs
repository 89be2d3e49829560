//! Metadata providers
//!
//! A provider turns a dataset identifier into an opened [`DataSource`]: it
//! locates the file and reports the element format, frame width, and byte
//! offset of the first element. Extraction itself never looks at file names
//! or container headers.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::region_pipeline::codec::{ByteOrder, ElementFormat};
use crate::region_pipeline::common::error::{ExtractionError, Result};
use crate::region_pipeline::source::types::{DataSource, SourceLayout};

pub trait MetadataProvider {
    fn open(&self, dataset: &str) -> Result<DataSource<File>>;
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        ExtractionError::InvalidMetadata(format!("{}: {}", path.display(), e))
    })
}

/// Datasets named `<base>_<format>_<frame_width>_<rows>` with no header.
///
/// For example `capture_SI_1000_2000` holds scalar int16 rows of 1000
/// elements, 2000 rows, starting at byte 0.
#[derive(Debug, Clone)]
pub struct FilenameConventionProvider {
    root: PathBuf,
}

impl FilenameConventionProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Parses the format and frame width out of a dataset file name.
    pub fn parse_name(name: &str) -> Result<(ElementFormat, usize)> {
        let invalid = || {
            ExtractionError::InvalidMetadata(format!(
                "'{}' does not match <base>_<format>_<xsize>_<ysize>",
                name
            ))
        };

        let mut parts = name.rsplitn(4, '_');
        let rows = parts.next().ok_or_else(invalid)?;
        let frame_width = parts.next().ok_or_else(invalid)?;
        let format = parts.next().ok_or_else(invalid)?;
        let base = parts.next().ok_or_else(invalid)?;
        if base.is_empty() {
            return Err(invalid());
        }

        // tolerate an extension on the last field, e.g. `_2000.tmp`
        let rows = rows.split('.').next().unwrap_or(rows);
        rows.parse::<usize>().map_err(|_| invalid())?;
        let frame_width = frame_width.parse::<usize>().map_err(|_| invalid())?;
        if frame_width == 0 {
            return Err(invalid());
        }

        Ok((format.parse()?, frame_width))
    }
}

impl MetadataProvider for FilenameConventionProvider {
    fn open(&self, dataset: &str) -> Result<DataSource<File>> {
        let path = self.root.join(dataset);
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ExtractionError::InvalidMetadata(format!("{}: no file name", path.display())))?;
        let (format, frame_width) = Self::parse_name(name)?;

        info!(path = %path.display(), %format, frame_width, "Opening dataset by file name");
        let file = open_file(&path)?;
        Ok(DataSource::new(file, SourceLayout::new(format, frame_width, 0)))
    }
}

/// Size of the fixed BLUE header block.
pub const BLUE_HEADER_LEN: usize = 512;

const ONE_DIMENSIONAL: i32 = 1000;
const TWO_DIMENSIONAL: i32 = 2000;

/// Datasets carrying a 512-byte BLUE header.
#[derive(Debug, Clone)]
pub struct BlueHeaderProvider {
    root: PathBuf,
}

/// The header fields extraction depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlueHeader {
    pub data_start: f64,
    pub data_size: f64,
    pub file_type: i32,
    pub format: ElementFormat,
    pub subsize: i32,
    pub data_order: ByteOrder,
}

fn rep_order(rep: &[u8]) -> Result<ByteOrder> {
    match rep {
        b"EEEI" => Ok(ByteOrder::Little),
        b"IEEE" => Ok(ByteOrder::Big),
        other => Err(ExtractionError::InvalidMetadata(format!(
            "unknown representation '{}'",
            String::from_utf8_lossy(other)
        ))),
    }
}

impl BlueHeader {
    pub fn parse(header: &[u8; BLUE_HEADER_LEN]) -> Result<Self> {
        if &header[0..4] != b"BLUE" {
            return Err(ExtractionError::InvalidMetadata("missing BLUE signature".to_string()));
        }
        let head_order = rep_order(&header[4..8])?;
        let data_order = rep_order(&header[8..12])?;

        let f64_at = |at: usize| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&header[at..at + 8]);
            match head_order {
                ByteOrder::Little => f64::from_le_bytes(raw),
                ByteOrder::Big => f64::from_be_bytes(raw),
            }
        };
        let i32_at = |at: usize| {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&header[at..at + 4]);
            match head_order {
                ByteOrder::Little => i32::from_le_bytes(raw),
                ByteOrder::Big => i32::from_be_bytes(raw),
            }
        };

        let format = std::str::from_utf8(&header[52..54])
            .map_err(|_| ExtractionError::InvalidFormat("non-ASCII format code".to_string()))?
            .parse()?;

        Ok(Self {
            data_start: f64_at(32),
            data_size: f64_at(40),
            file_type: i32_at(48),
            format,
            subsize: i32_at(276),
            data_order,
        })
    }

    pub fn layout(&self) -> Result<SourceLayout> {
        if !self.data_start.is_finite() || self.data_start < 0.0 {
            return Err(ExtractionError::InvalidMetadata(format!(
                "bad data start {}",
                self.data_start
            )));
        }

        let frame_width = match self.file_type / 1000 * 1000 {
            TWO_DIMENSIONAL if self.subsize > 0 => self.subsize as usize,
            TWO_DIMENSIONAL => {
                return Err(ExtractionError::InvalidMetadata(format!(
                    "type 2000 file with subsize {}",
                    self.subsize
                )));
            }
            // a 1-D file is a single row holding every element
            ONE_DIMENSIONAL => {
                let elements = self.data_size / self.format.element_byte_width() as f64;
                (elements.max(1.0)) as usize
            }
            other => {
                return Err(ExtractionError::InvalidMetadata(format!(
                    "unsupported file type {}",
                    other
                )));
            }
        };

        Ok(SourceLayout::new(self.format, frame_width, self.data_start as u64)
            .with_byte_order(self.data_order))
    }
}

impl BlueHeaderProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MetadataProvider for BlueHeaderProvider {
    fn open(&self, dataset: &str) -> Result<DataSource<File>> {
        let path = self.root.join(dataset);
        let mut file = open_file(&path)?;

        let mut header = [0u8; BLUE_HEADER_LEN];
        file.read_exact(&mut header).map_err(|e| {
            ExtractionError::InvalidMetadata(format!("{}: short header: {}", path.display(), e))
        })?;
        let header = BlueHeader::parse(&header)?;
        debug!(?header, "Parsed BLUE header");

        let layout = header.layout()?;
        info!(
            path = %path.display(),
            format = %layout.format,
            frame_width = layout.frame_width,
            data_start = layout.data_start,
            "Opening BLUE dataset"
        );
        Ok(DataSource::new(file, layout))
    }
}
