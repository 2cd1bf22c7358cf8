//! Reference tables for the CIE standard observer and illuminant.
//!
//! Pigment measurements often come with absorption and scattering only. This
//! module provides the CIE 1931 2º standard observer and the CIE standard
//! illuminant D65 at 10nm resolution, from 380nm to 780nm, so that
//! [`SpectralDataBuilder`](crate::data::SpectralDataBuilder) can complete such
//! measurements by joining them on wavelength.

mod d_series;
mod two_deg;

pub use d_series::CIE_ILLUMINANT_D65;
pub use two_deg::CIE_OBSERVER_2DEG_1931;

use crate::Float;

/// A table-driven illuminant with a fixed wavelength step.
#[derive(Clone, Debug)]
pub struct Illuminant {
    label: &'static str,
    start: usize,
    step: usize,
    data: &'static [Float],
}

impl Illuminant {
    /// Create a new illuminant.
    pub const fn new(label: &'static str, start: usize, step: usize, data: &'static [Float]) -> Self {
        Self {
            label,
            start,
            step,
            data,
        }
    }

    /// Get a descriptive label for this illuminant.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Get the illuminant's relative power at the given wavelength.
    ///
    /// This method returns none if the wavelength is out of range or does not
    /// fall onto the table's grid.
    pub fn at(&self, wavelength: Float) -> Option<Float> {
        lookup(self.start, self.step, self.data.len(), wavelength).map(|index| self.data[index])
    }

    /// Get the wavelengths covered by this illuminant.
    pub fn wavelengths(&self) -> impl Iterator<Item = Float> {
        wavelengths(self.start, self.step, self.data.len())
    }
}

/// A table-driven standard observer with a fixed wavelength step.
#[derive(Clone, Debug)]
pub struct Observer {
    label: &'static str,
    start: usize,
    step: usize,
    data: &'static [[Float; 3]],
}

impl Observer {
    /// Create a new observer.
    pub const fn new(
        label: &'static str,
        start: usize,
        step: usize,
        data: &'static [[Float; 3]],
    ) -> Self {
        Self {
            label,
            start,
            step,
            data,
        }
    }

    /// Get a descriptive label for this observer.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Get the color matching functions' values x̄, ȳ, z̄ at the given
    /// wavelength.
    ///
    /// This method returns none if the wavelength is out of range or does not
    /// fall onto the table's grid.
    pub fn at(&self, wavelength: Float) -> Option<[Float; 3]> {
        lookup(self.start, self.step, self.data.len(), wavelength).map(|index| self.data[index])
    }

    /// Get the wavelengths covered by this observer.
    pub fn wavelengths(&self) -> impl Iterator<Item = Float> {
        wavelengths(self.start, self.step, self.data.len())
    }
}

fn lookup(start: usize, step: usize, len: usize, wavelength: Float) -> Option<usize> {
    let offset = (wavelength - start as Float) / step as Float;
    let index = offset.round();
    if index < 0.0 || (offset - index).abs() > 1e-6 {
        return None;
    }

    let index = index as usize;
    (index < len).then_some(index)
}

fn wavelengths(start: usize, step: usize, len: usize) -> impl Iterator<Item = Float> {
    (0..len).map(move |index| (start + index * step) as Float)
}
