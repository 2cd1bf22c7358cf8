//! Utility module with pigmix's errors.
//!
//! Each family of failures has its own type, so that callers can match on
//! exactly what a component may report. [`Error`] combines them for the
//! [`Mixer`](crate::Mixer) entry points, which touch several components at
//! once.

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};

use crate::Float;

/// An invalid mixture.
///
/// Mixtures weigh each pigment's absorption and scattering by its share of the
/// total ratio. That only works out with finite, non-negative ratios adding up
/// to a positive total.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidMixtureError {
    /// A mixture without any pigments.
    #[error("mixture should contain at least one pigment but is empty")]
    Empty,

    /// A mixture with a ratio that is negative, infinite, or not-a-number.
    #[error("mixture ratio for {pigment} should be a finite, non-negative number but is {ratio}")]
    BadRatio { pigment: &'static str, ratio: Float },

    /// A mixture whose ratios add up to zero.
    #[error("mixture ratios should add up to a positive total but add up to {0}")]
    ZeroTotal(Float),
}

#[cfg(feature = "pyffi")]
impl From<InvalidMixtureError> for PyErr {
    fn from(value: InvalidMixtureError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An invalid pigment selection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSelectionError {
    /// A pigment name without entry in the name to column table. Names are
    /// case-sensitive.
    #[error("pigment name `{0}` should be one of the known pigments but is not")]
    UnknownPigment(String),

    /// A selection with too few or too many pigments.
    #[error("selection should contain {min}..={max} pigments but contains {actual}")]
    Count {
        actual: usize,
        min: usize,
        max: usize,
    },

    /// A selection whose names and ratios do not line up.
    #[error("selection should have one ratio per pigment but has {names} names and {ratios} ratios")]
    ArityMismatch { names: usize, ratios: usize },

    /// A gamut resolution beyond the supported maximum.
    #[error("gamut should have at most {max} steps but has {steps}")]
    TooManySteps { steps: usize, max: usize },

    /// A known pigment without absorption and scattering data in the loaded
    /// dataset.
    #[error("pigment {0} has no absorption and scattering data in the dataset")]
    Unavailable(&'static str),
}

#[cfg(feature = "pyffi")]
impl From<InvalidSelectionError> for PyErr {
    fn from(value: InvalidSelectionError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An error indicating that the spectral dataset has not been loaded yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("spectral dataset should be loaded before computing colors but is not ready")]
pub struct DataNotReadyError;

#[cfg(feature = "pyffi")]
impl From<DataNotReadyError> for PyErr {
    fn from(value: DataNotReadyError) -> Self {
        pyo3::exceptions::PyRuntimeError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An error while loading or assembling the spectral dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset is not well-formed JSON or not an array of records.
    #[error("could not parse spectral dataset")]
    Json(#[from] serde_json::Error),

    /// The dataset could not be read.
    #[error("could not read spectral dataset")]
    Io(#[from] std::io::Error),

    /// A record lacks a required numeric field.
    #[error("record {record} should have numeric field `{field}` but does not")]
    MissingField { record: usize, field: String },

    /// A record has a negative or non-finite value where that makes no sense.
    #[error("record {record} should have a finite, non-negative `{field}` but has {value}")]
    BadValue {
        record: usize,
        field: String,
        value: Float,
    },

    /// Fewer than two samples, which leaves the wavelength step undefined.
    #[error("dataset should have at least 2 samples but has {0}")]
    TooFewSamples(usize),

    /// Wavelengths that do not increase with a constant step.
    #[error("wavelength {wavelength} of record {record} should be {expected} for a uniform axis")]
    NonUniformAxis {
        record: usize,
        wavelength: Float,
        expected: Float,
    },

    /// An illuminant and observer combination without any luminance.
    #[error("illuminant and observer should produce positive luminance but produce {0}")]
    NoLuminance(Float),

    /// A second attempt at initializing the process-wide dataset.
    #[error("spectral dataset has already been initialized")]
    AlreadyInitialized,
}

#[cfg(feature = "pyffi")]
impl From<DatasetError> for PyErr {
    fn from(value: DatasetError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// Any error reported by the mixing pipeline.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidMixture(#[from] InvalidMixtureError),

    #[error(transparent)]
    InvalidSelection(#[from] InvalidSelectionError),

    #[error(transparent)]
    DataNotReady(#[from] DataNotReadyError),
}

#[cfg(feature = "pyffi")]
impl From<Error> for PyErr {
    fn from(value: Error) -> Self {
        match value {
            Error::InvalidMixture(error) => error.into(),
            Error::InvalidSelection(error) => error.into(),
            Error::DataNotReady(error) => error.into(),
        }
    }
}
