//! The artists' pigments with measured absorption and scattering.
//!
//! [`Pigment`] enumerates the pigments a spectral dataset may describe. Each
//! pigment has a human-readable name, which is what user interfaces show and
//! send back, and a key, which names the dataset columns with its absorption
//! and scattering coefficients. The keys come straight from the dataset and
//! hence are inconsistently capitalized. They must be used as is.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::error::InvalidSelectionError;

/// An artists' pigment.
///
/// The pigments are ordered the way user interfaces present them.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, ord, module = "pigmix")
)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pigment {
    White,
    Black,
    CobaltBlue,
    QuinacridoneMagenta,
    PhthaloBlueGreenShade,
    HansaYellow,
    PhthaloGreen,
    PyrroleRed,
    UltramarineBlue,
    DioxazinePurple,
    PyrroleOrange,
}

/// The table mapping pigment names to column keys, in canonical order.
const PIGMENT_TABLE: [(Pigment, &str, &str); Pigment::COUNT] = [
    (Pigment::White, "White", "white"),
    (Pigment::Black, "Black", "black"),
    (Pigment::CobaltBlue, "Cobalt Blue", "cobalt b"),
    (
        Pigment::QuinacridoneMagenta,
        "Quinacridone Magenta",
        "quinacridone Magenta",
    ),
    (
        Pigment::PhthaloBlueGreenShade,
        "Phthalo Blue (Green Shade)",
        "phthalo blue (green shade)",
    ),
    (Pigment::HansaYellow, "Hansa Yellow", "hansa Yellow"),
    (Pigment::PhthaloGreen, "Phthalo Green", "phthalo Green"),
    (Pigment::PyrroleRed, "Pyrrole Red", "pyrrole Red"),
    (Pigment::UltramarineBlue, "Ultramarine Blue", "ultramarine Blue"),
    (Pigment::DioxazinePurple, "Dioxazine Purple", "dioxazine Purple"),
    (Pigment::PyrroleOrange, "Pyrrole Orange", "pyrrole Orange"),
];

impl Pigment {
    /// The total number of pigments.
    pub const COUNT: usize = 11;

    /// Get an iterator over all pigments in canonical order.
    pub fn all() -> PigmentIterator {
        PigmentIterator::new()
    }

    /// Get the zero-based index of this pigment in canonical order.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get the name of the absorption column for this pigment.
    pub fn k_column(&self) -> String {
        format!("k {}", self.key())
    }

    /// Get the name of the scattering column for this pigment.
    pub fn s_column(&self) -> String {
        format!("s {}", self.key())
    }
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl Pigment {
    /// Look up a pigment by its exact name.
    ///
    /// Names are matched verbatim, including capitalization, spacing, and
    /// parentheses.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn from_name(name: &str) -> Result<Pigment, InvalidSelectionError> {
        name.parse()
    }

    /// Get this pigment's human-readable name.
    pub fn name(&self) -> &'static str {
        PIGMENT_TABLE[self.index()].1
    }

    /// Get this pigment's column key.
    pub fn key(&self) -> &'static str {
        PIGMENT_TABLE[self.index()].2
    }

    /// Render a debug representation for this pigment. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!("{:?}", self)
    }

    /// Render this pigment's name. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __str__(&self) -> String {
        self.name().to_owned()
    }
}

impl core::str::FromStr for Pigment {
    type Err = InvalidSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PIGMENT_TABLE
            .iter()
            .find(|&&(_, name, _)| name == s)
            .map(|&(pigment, _, _)| pigment)
            .ok_or_else(|| InvalidSelectionError::UnknownPigment(s.to_owned()))
    }
}

impl TryFrom<usize> for Pigment {
    type Error = InvalidSelectionError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PIGMENT_TABLE
            .get(value)
            .map(|&(pigment, _, _)| pigment)
            .ok_or_else(|| InvalidSelectionError::UnknownPigment(format!("#{}", value)))
    }
}

impl From<Pigment> for &'static str {
    fn from(value: Pigment) -> Self {
        value.name()
    }
}

impl serde::Serialize for Pigment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl core::fmt::Display for Pigment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// An iterator over all pigments in canonical order.
#[cfg_attr(feature = "pyffi", pyclass(module = "pigmix"))]
#[derive(Debug)]
pub struct PigmentIterator {
    index: usize,
}

impl PigmentIterator {
    fn new() -> Self {
        Self { index: 0 }
    }
}

impl Iterator for PigmentIterator {
    type Item = Pigment;

    fn next(&mut self) -> Option<Self::Item> {
        let &(pigment, _, _) = PIGMENT_TABLE.get(self.index)?;
        self.index += 1;
        Some(pigment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Pigment::COUNT - self.index;
        (remaining, Some(remaining))
    }
}

impl core::iter::ExactSizeIterator for PigmentIterator {
    fn len(&self) -> usize {
        Pigment::COUNT - self.index
    }
}

impl core::iter::FusedIterator for PigmentIterator {}

#[cfg(feature = "pyffi")]
#[pymethods]
impl PigmentIterator {
    /// Get the number of remaining pigments. <i class=python-only>Python only!</i>
    pub fn __len__(&self) -> usize {
        self.len()
    }

    /// Get this iterator. <i class=python-only>Python only!</i>
    pub fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    /// Get the next pigment. <i class=python-only>Python only!</i>
    pub fn __next__(mut slf: PyRefMut<'_, Self>) -> Option<Pigment> {
        slf.next()
    }
}
