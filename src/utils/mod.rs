//! Test-support utilities: comparisons, random data and reporting.

pub mod noise;
pub mod reporting;
pub mod testutils;

pub use noise::{noise_array, noise_array_with, noise_element, noise_elements};
pub use reporting::{FailCounter, Timer};
pub use testutils::{all_almost_equal, all_equal};
