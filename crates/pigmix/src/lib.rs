//! # Pigmix
//!
//! Pigmix predicts the color of mixing artists' paints. It combines the
//! measured absorption and scattering spectra of pigments per the
//! Kubelka-Munk model, integrates the resulting reflectance spectrum under a
//! standard illuminant and observer, and converts to 24-bit sRGB. It also
//! samples the gamut of two- and three-pigment mixtures and projects
//! three-pigment mixtures onto a ternary plot.
#![cfg_attr(
    not(feature = "pyffi"),
    doc = " This version of the API documentation **covers native Rust interfaces
only**."
)]
#![cfg_attr(
    feature = "pyffi",
    doc = " This version of the API documentation **covers both Rust and Python
interfaces**."
)]
//!
//!
//! ## 1. Overview
//!
//! Pigmix's main abstractions are:
//!
//!   * [`SpectralData`](data::SpectralData) is the **validated spectral
//!     dataset** with each pigment's absorption K and scattering S as well as
//!     the observer's color matching functions and the illuminant's power, all
//!     sampled at the same, uniformly spaced wavelengths.
//!     [`SpectralStore`](data::SpectralStore) holds the dataset once it has
//!     been loaded.
//!   * [`Pigment`] enumerates the **known pigments** and maps their names to
//!     dataset columns. A [`Mixture`](reflectance::Mixture) combines pigments
//!     in ratios.
//!   * [`Mixer`] is the **entry point for computing colors**. It mixes
//!     pigments as paint and as light, samples gamuts, and computes ternary
//!     plots, all producing [`DisplayColor`]s.
//!   * [`Options`](opt::Options) configure the mixer, with overrides from the
//!     environment.
//!
//!
//! ## 2. Mixing Colors
//!
//! ```
//! # use pigmix::{Mixer, Pigment};
//! # use pigmix::data::SpectralDataBuilder;
//! # use pigmix::opt::Options;
//! # use pigmix::reflectance::Mixture;
//! # use std::sync::Arc;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = SpectralDataBuilder::new()
//!     .pigment_with(Pigment::White, |_| (0.01, 1.0))
//!     .pigment_with(Pigment::Black, |_| (10.0, 0.5))
//!     .build()?;
//! let mixer = Mixer::new(Arc::new(data), Options::default());
//!
//! let gray = Mixture::try_from([(Pigment::White, 1.0), (Pigment::Black, 1.0)])?;
//! let result = mixer.mix(&gray)?;
//! assert!(result.km[1] < result.light[1]);
//! # Ok(())
//! # }
//! ```
//!
//!
//! ## 3. Optional Features
//!
//! Pigmix supports two feature flags:
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     instead of `f32`. This feature is enabled by default.
//!   - **`pyffi`** controls pigmix's Python integration through
//!     [PyO3](https://pyo3.rs/). This feature is disabled by default.
#![cfg_attr(
    feature = "pyffi",
    doc = "Items that are only available in Python are decorated with <i
    class=python-only>Python only!</i>."
)]

extern crate alloc;

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

pub mod cie;
pub mod convert;
mod core;
pub mod data;
pub mod error;
pub mod gamut;
mod mixer;
pub mod opt;
mod pigment;
pub mod reflectance;
pub mod ternary;
pub mod tristimulus;
mod util;

#[cfg(test)]
mod test_util;

pub use convert::DisplayColor;
pub use mixer::{MixResult, Mixer};
pub use pigment::{Pigment, PigmentIterator};

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn pigmix(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<DisplayColor>()?;
    m.add_class::<Mixer>()?;
    m.add_class::<Pigment>()?;
    m.add_class::<PigmentIterator>()?;
    Ok(())
}
