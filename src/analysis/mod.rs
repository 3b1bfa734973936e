//! Static and dynamic characterization analyses.
//!
//! Each analysis is a pure function over a validated
//! [`DeviceParameters`](crate::DeviceParameters) snapshot returning plain
//! numeric records; formatting and plotting belong to the presentation
//! layer and are never invoked from here.

mod critical;
mod power;
mod transient;
mod vtc;

pub use critical::{compute_critical_points, compute_critical_points_with, CriticalPoints};
pub use power::{power_profile, PowerPoint, PowerProfile};
pub use transient::{simulate_transient, TransientSample, TransientTrace};
pub use vtc::{generate_vtc, generate_vtc_with, OperatingPoint, VtcCurve};
