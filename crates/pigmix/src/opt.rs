//! Helper module with the options for mixing pigments.
//!
//! This module provides the options for a [`Mixer`](crate::Mixer) and the
//! corresponding builder. Options cover the gamut resolution, the dataset's
//! illuminant column, the ternary canvas geometry, and the optional
//! Saunderson correction.
//!
//! Except for the Saunderson correction, each option can also be overridden
//! through an environment variable:
//!
//! | Option              | Environment variable |
//! | ------------------- | -------------------- |
//! | `steps`             | `PIGMIX_STEPS`       |
//! | `illuminant_column` | `PIGMIX_ILLUMINANT`  |
//! | `padding`           | `PIGMIX_PADDING`     |
//! | `dot_size`          | `PIGMIX_DOT_SIZE`    |
//!
//! Values that do not parse, including a zero step count, are logged and
//! ignored. So are step counts above [`MAX_STEPS`](crate::gamut::MAX_STEPS).
//!
//!
//! # Example
//!
//! ```
//! # use pigmix::opt::Options;
//! # use std::num::NonZeroUsize;
//! let options = Options::builder()
//!     .steps(NonZeroUsize::new(10).unwrap())
//!     .build();
//!
//! assert_eq!(options.steps().get(), 10);
//! assert_eq!(options.illuminant_column(), "power");
//! ```

use core::num::NonZeroUsize;

use crate::gamut::MAX_STEPS;
use crate::reflectance::Saunderson;
use crate::ternary::TernaryCanvas;
use crate::util::{Env, Environment};
use crate::Float;

#[derive(Clone, Debug)]
struct OptionData {
    steps: NonZeroUsize,
    illuminant_column: String,
    canvas: TernaryCanvas,
    saunderson: Option<Saunderson>,
}

impl OptionData {
    pub fn new() -> Self {
        Self {
            steps: Options::DEFAULT_STEPS,
            illuminant_column: "power".to_owned(),
            canvas: TernaryCanvas::default(),
            saunderson: None,
        }
    }
}

/// A builder of options objects.
#[derive(Debug)]
pub struct OptionBuilder(OptionData);

impl OptionBuilder {
    /// Set the number of steps per gamut edge.
    ///
    /// Gamut sampling fails for more than [`MAX_STEPS`] steps.
    pub fn steps(&mut self, steps: NonZeroUsize) -> &mut Self {
        self.0.steps = steps;
        self
    }

    /// Set the name of the dataset column with the illuminant's power.
    pub fn illuminant_column(&mut self, column: &str) -> &mut Self {
        self.0.illuminant_column = column.to_owned();
        self
    }

    /// Set the canvas for ternary plots.
    pub fn canvas(&mut self, canvas: TernaryCanvas) -> &mut Self {
        self.0.canvas = canvas;
        self
    }

    /// Set the canvas padding in pixels.
    pub fn padding(&mut self, padding: Float) -> &mut Self {
        self.0.canvas = self.0.canvas.with_padding(padding);
        self
    }

    /// Set the size of ternary plot dots in pixels.
    pub fn dot_size(&mut self, size: Float) -> &mut Self {
        self.0.canvas = self.0.canvas.with_dot_size(size);
        self
    }

    /// Enable or disable the Saunderson correction.
    pub fn saunderson(&mut self, correction: Option<Saunderson>) -> &mut Self {
        self.0.saunderson = correction;
        self
    }

    /// Apply any overrides from the process environment.
    pub fn environment(&mut self) -> &mut Self {
        self.apply(&Env::default())
    }

    pub(crate) fn apply<E: Environment>(&mut self, env: &E) -> &mut Self {
        if let Some(steps) = env.parse::<NonZeroUsize>("PIGMIX_STEPS") {
            if steps.get() <= MAX_STEPS {
                self.steps(steps);
            } else {
                log::warn!("ignoring PIGMIX_STEPS={} above maximum of {}", steps, MAX_STEPS);
            }
        }
        if let Some(column) = env.read_non_empty("PIGMIX_ILLUMINANT") {
            self.illuminant_column(&column);
        }
        if let Some(padding) = env.parse::<Float>("PIGMIX_PADDING") {
            if padding.is_finite() && 0.0 <= padding {
                self.padding(padding);
            }
        }
        if let Some(size) = env.parse::<Float>("PIGMIX_DOT_SIZE") {
            if size.is_finite() && 0.0 < size {
                self.dot_size(size);
            }
        }
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> Options {
        Options(self.0.clone())
    }
}

/// An options object.
#[derive(Clone, Debug)]
pub struct Options(OptionData);

impl Default for Options {
    fn default() -> Self {
        Options(OptionData::new())
    }
}

impl Options {
    /// The default number of steps per gamut edge.
    pub const DEFAULT_STEPS: NonZeroUsize = match NonZeroUsize::new(20) {
        Some(steps) => steps,
        None => unreachable!(),
    };

    /// Create a new builder with the default option values.
    pub fn builder() -> OptionBuilder {
        OptionBuilder(OptionData::new())
    }

    /// Instantiate the default options with overrides from the process
    /// environment.
    pub fn from_environment() -> Options {
        Self::builder().environment().build()
    }

    /// Get the number of steps per gamut edge.
    pub fn steps(&self) -> NonZeroUsize {
        self.0.steps
    }

    /// Get the name of the illuminant column.
    pub fn illuminant_column(&self) -> &str {
        &self.0.illuminant_column
    }

    /// Get the ternary canvas.
    pub fn canvas(&self) -> &TernaryCanvas {
        &self.0.canvas
    }

    /// Get the Saunderson correction, if enabled.
    pub fn saunderson(&self) -> Option<Saunderson> {
        self.0.saunderson
    }
}
