//! Contrast and brightness enhancement transforms.
//!
//! Every transform takes an intensity [`Channel`](crate::channel::Channel)
//! and returns a new channel of the same shape. Inputs that would divide by
//! zero (flat histograms, constant channels, single-row images) produce the
//! identity result instead of NaN-filled output.

pub mod agcwd;
pub mod dct;
pub mod equalize;
pub mod sece;
pub mod sigmoid;
pub mod stretch;
