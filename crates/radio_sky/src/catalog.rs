//! Catalog records and sinks for streaming galaxy parameters.
//!
//! The compositor hands each galaxy's [`CatalogRecord`] to a [`CatalogSink`] right after
//! sampling. Sinks provided here discard (`()`), collect ([`VecSink`]), forward to a
//! closure ([`FnSink`]) or format text lines to any writer ([`TextCatalogSink`]).
use std::io::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sampling::GalaxySample;

/// Header line written before the first record of a text catalog.
pub const CATALOG_HEADER: &str = "# xind yind sigx sigy orientation flux";

/// Catalog entry for one galaxy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogRecord {
    pub x: usize,
    pub y: usize,
    pub sigma_x: f64,
    pub sigma_y: f64,
    pub position_angle_deg: f64,
    pub flux: f64,
}

impl CatalogRecord {
    /// Format as a catalog text line (without trailing newline).
    pub fn to_line(&self) -> String {
        format!(
            "{}  {} {:.2} {:.2} {:.3} {:.4}",
            self.x, self.y, self.sigma_x, self.sigma_y, self.position_angle_deg, self.flux
        )
    }
}

impl From<&GalaxySample> for CatalogRecord {
    fn from(g: &GalaxySample) -> Self {
        Self {
            x: g.x,
            y: g.y,
            sigma_x: g.sigma_x,
            sigma_y: g.sigma_y,
            position_angle_deg: g.position_angle_deg,
            flux: g.flux,
        }
    }
}

/// A sink that accepts catalog records, one per galaxy, in sampling order.
pub trait CatalogSink {
    /// Called once before the first record of a run.
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, record: &CatalogRecord) -> Result<()>;
}

/// A no-op catalog sink.
impl CatalogSink for () {
    #[inline]
    fn record(&mut self, _record: &CatalogRecord) -> Result<()> {
        Ok(())
    }
}

/// A catalog sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(&CatalogRecord) -> Result<()>,
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(&CatalogRecord) -> Result<()>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> CatalogSink for FnSink<F>
where
    F: FnMut(&CatalogRecord) -> Result<()>,
{
    #[inline]
    fn record(&mut self, record: &CatalogRecord) -> Result<()> {
        (self.f)(record)
    }
}

/// A catalog sink that collects all records in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    records: Vec<CatalogRecord>,
    headers: usize,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            records: Vec::with_capacity(cap),
            headers: 0,
        }
    }

    pub fn into_inner(self) -> Vec<CatalogRecord> {
        self.records
    }

    pub fn as_slice(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Number of header requests received.
    pub fn header_count(&self) -> usize {
        self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CatalogSink for VecSink {
    fn write_header(&mut self) -> Result<()> {
        self.headers += 1;
        Ok(())
    }

    #[inline]
    fn record(&mut self, record: &CatalogRecord) -> Result<()> {
        self.records.push(*record);
        Ok(())
    }
}

/// Line-oriented text catalog written to any [`Write`] implementation.
///
/// Records are written as they arrive; nothing is buffered beyond what the
/// writer itself buffers.
pub struct TextCatalogSink<W: Write> {
    writer: W,
}

impl<W: Write> TextCatalogSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CatalogSink for TextCatalogSink<W> {
    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "{CATALOG_HEADER}")?;
        Ok(())
    }

    fn record(&mut self, record: &CatalogRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.to_line())?;
        Ok(())
    }
}
