use candle_core::Device;
use tracing::{debug, warn};

/// Selects the compute device based on enabled features (falls back to CPU).
///
/// Device selection never fails: a missing GPU degrades to CPU inference,
/// which is adequate for the small sentence encoders this crate targets.
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            debug!("Using Metal GPU for embedding inference");
            return device;
        }
        Err(e) => warn!(error = %e, "Metal device unavailable"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            debug!("Using CUDA GPU for embedding inference");
            return device;
        }
        Err(e) => warn!(error = %e, "CUDA device unavailable"),
    }

    debug!("Using CPU device for embedding inference");
    Device::Cpu
}
