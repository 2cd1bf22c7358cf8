mod conversion;
mod math;

// conversion
pub(crate) use conversion::{
    clip, decode_gamma, decode_gamma_approx, encode_gamma, from_8bit, linear_srgb_to_xyz, to_8bit,
    xyz_to_linear_srgb,
};

// math
pub(crate) use math::{Sum, ThreeSum};
