use crate::Float;

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
pub(crate) fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = *matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------
// IEC 61966-2-1, rounded to four decimals

#[rustfmt::skip]
const XYZ_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  3.2406, -1.5372, -0.4986 ],
    [ -0.9689,  1.8758,  0.0415 ],
    [  0.0557, -0.2040,  1.0570 ],
];

/// Convert coordinates for XYZ to linear sRGB. This is a one-hop, direct
/// conversion.
pub(crate) fn xyz_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    multiply(&XYZ_TO_LINEAR_SRGB, value)
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_XYZ: [[Float; 3]; 3] = [
    [ 0.4124564, 0.3575761, 0.1804375 ],
    [ 0.2126729, 0.7151522, 0.0721750 ],
    [ 0.0193339, 0.1191920, 0.9503041 ],
];

/// Convert coordinates for linear sRGB to XYZ. This is a one-hop, direct
/// conversion.
pub(crate) fn linear_srgb_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    multiply(&LINEAR_SRGB_TO_XYZ, value)
}

// --------------------------------------------------------------------------------------------------------------------

/// Clip linear RGB coordinates to the unit cube.
#[inline]
pub(crate) fn clip(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = *value;
    [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
}

/// Apply sRGB's piecewise gamma to a single linear coordinate.
///
/// Unlike the symmetric transfer function used for high-resolution colors,
/// this version saturates: Non-positive inputs produce 0 and inputs of 1 or
/// more produce 1. Not-a-number also produces 0.
#[inline]
pub(crate) fn encode_gamma(value: Float) -> Float {
    if value.is_nan() || value <= 0.0 {
        0.0
    } else if value <= 0.0031308 {
        12.92 * value
    } else if value < 1.0 {
        value.powf(1.0 / 2.4).mul_add(1.055, -0.055)
    } else {
        1.0
    }
}

/// Undo gamma with a plain power of 2.2.
///
/// This is not the inverse of [`encode_gamma`]. Additive light mixing uses this
/// approximation.
#[inline]
pub(crate) fn decode_gamma_approx(value: Float) -> Float {
    value.powf(2.2)
}

/// Undo sRGB's piecewise gamma exactly. Negative inputs retain their sign.
#[inline]
pub(crate) fn decode_gamma(value: Float) -> Float {
    let magnitude = value.abs();
    if magnitude <= 0.04045 {
        value / 12.92
    } else {
        ((magnitude + 0.055) / 1.055).powf(2.4).copysign(value)
    }
}

/// Convert a unit-range coordinate to an 8-bit integer, rounding to nearest.
#[inline]
pub(crate) fn to_8bit(value: Float) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert an 8-bit integer to a unit-range coordinate.
#[inline]
pub(crate) fn from_8bit(value: u8) -> Float {
    value as Float / 255.0
}
