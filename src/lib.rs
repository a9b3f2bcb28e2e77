//! N-dimensional real and complex FFTs over row-major data, backed by FFTW.
//!
//! The high-level entry points live in [`fft`]: they read input through
//! [`sampler`] callbacks or plain slices and hand results to writers. The
//! lower layers ([`buffer`], [`driver`], [`planner`]) are public for callers
//! that want to keep native buffers around between transforms.
pub use crate::buffer::NativeBuffer;
pub use crate::coords::CoordinateMapper;
pub use crate::error::{Error, Result};
pub use crate::fft::{
    fft_complex, fft_complex_slices, fft_complex_with_opts, fft_real, fft_real_slices,
    fft_real_with_opts, ifft_complex, ifft_complex_slices, ifft_complex_with_opts, ifft_real,
    ifft_real_slices, ifft_real_with_opts,
};
pub use crate::options::{Options, PlanRigor};
pub use crate::planner::Direction;

pub mod array;
pub mod buffer;
pub mod coords;
pub mod driver;
pub mod error;
pub mod fft;
pub mod options;
pub mod planner;
pub mod precision;
pub mod runtime;
pub mod sampler;
mod utils;
