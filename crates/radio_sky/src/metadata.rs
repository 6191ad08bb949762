//! Image axis metadata for a simulated cube.
//!
//! [`ImageMetadata`] holds the values an external image writer needs to describe the
//! canvas: two sine-projected spatial axes, one frequency axis and one Stokes axis.
//! It does not encode them in any file format.
use std::fmt;

use crate::config::SimulationConfig;

/// Sample format of the written image (IEEE single precision).
pub const BITPIX: i32 = -32;

/// Description of one image axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDescriptor {
    pub ctype: &'static str,
    pub naxis: usize,
    pub crpix: f64,
    pub crval: f64,
    pub cdelt: f64,
    pub cunit: &'static str,
}

/// A header value for an external writer.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Int(v) => write!(f, "{v}"),
            HeaderValue::Float(v) => write!(f, "{v:?}"),
            HeaderValue::Text(s) => write!(f, "'{s}'"),
        }
    }
}

/// Axis metadata for a `(nx, ny, nchan, 1)` cube.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMetadata {
    pub object: String,
    pub axes: [AxisDescriptor; 4],
}

impl ImageMetadata {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let pixel_deg = config.pixel_size_arcsec / 3600.0;
        let band_center_hz = 1e9 * 0.5 * (config.freq_min_ghz + config.freq_max_ghz);

        let axes = [
            AxisDescriptor {
                ctype: "RA---SIN",
                naxis: config.nx,
                crpix: (config.nx / 2) as f64,
                crval: 0.0,
                cdelt: -pixel_deg,
                cunit: "deg",
            },
            AxisDescriptor {
                ctype: "DEC--SIN",
                naxis: config.ny,
                crpix: (config.ny / 2) as f64,
                crval: config.reference_dec_deg,
                cdelt: pixel_deg,
                cunit: "deg",
            },
            AxisDescriptor {
                ctype: "FREQ",
                naxis: config.nchan,
                crpix: 1.0,
                crval: band_center_hz,
                cdelt: 1e9 * config.channel_spacing_ghz(),
                cunit: "Hz",
            },
            AxisDescriptor {
                ctype: "STOKES",
                naxis: 1,
                crpix: 1.0,
                crval: 1.0,
                cdelt: 1.0,
                cunit: "",
            },
        ];

        Self {
            object: "source".into(),
            axes,
        }
    }

    /// Keyword/value pairs in conventional header order.
    pub fn cards(&self) -> Vec<(String, HeaderValue)> {
        let mut cards = Vec::with_capacity(6 + self.axes.len() * 6);
        cards.push(("BITPIX".into(), HeaderValue::Int(BITPIX as i64)));
        cards.push(("NAXIS".into(), HeaderValue::Int(self.axes.len() as i64)));
        for (i, axis) in self.axes.iter().enumerate() {
            cards.push((format!("NAXIS{}", i + 1), HeaderValue::Int(axis.naxis as i64)));
        }
        cards.push(("OBJECT".into(), HeaderValue::Text(self.object.clone())));
        for (i, axis) in self.axes.iter().enumerate() {
            let n = i + 1;
            cards.push((format!("CTYPE{n}"), HeaderValue::Text(axis.ctype.into())));
            cards.push((format!("CRPIX{n}"), HeaderValue::Float(axis.crpix)));
            cards.push((format!("CRVAL{n}"), HeaderValue::Float(axis.crval)));
            cards.push((format!("CDELT{n}"), HeaderValue::Float(axis.cdelt)));
            cards.push((format!("CUNIT{n}"), HeaderValue::Text(axis.cunit.into())));
        }
        cards
    }

    /// Look up a card value by keyword.
    pub fn card(&self, keyword: &str) -> Option<HeaderValue> {
        self.cards()
            .into_iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, v)| v)
    }
}
