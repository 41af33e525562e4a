//! Compute device for the similarity, entity and topic models.

use candle_core::Device;
use tracing::{debug, info, warn};

/// GPU backends, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accelerator {
    Metal,
    Cuda,
}

impl Accelerator {
    /// Backends compiled into this build through the `metal` and `cuda` features.
    pub fn compiled() -> Vec<Accelerator> {
        let mut compiled = Vec::new();
        if cfg!(feature = "metal") {
            compiled.push(Accelerator::Metal);
        }
        if cfg!(feature = "cuda") {
            compiled.push(Accelerator::Cuda);
        }
        compiled
    }

    fn open(self) -> candle_core::Result<Device> {
        match self {
            Accelerator::Metal => Device::new_metal(0),
            Accelerator::Cuda => Device::new_cuda(0),
        }
    }
}

/// Picks the device a model is loaded on: the first compiled accelerator that opens,
/// else the CPU. Never fails.
pub fn select_device() -> Device {
    first_available(&Accelerator::compiled())
}

fn first_available(accelerators: &[Accelerator]) -> Device {
    let mut failures = Vec::with_capacity(accelerators.len());

    for &accelerator in accelerators {
        match accelerator.open() {
            Ok(device) => {
                info!(?accelerator, "Running NLP model on GPU");
                return device;
            }
            Err(e) => {
                warn!(?accelerator, error = %e, "Accelerator unavailable");
                failures.push(format!("{accelerator:?}: {e}"));
            }
        }
    }

    if failures.is_empty() {
        debug!("No GPU backend compiled, running NLP model on CPU");
    } else {
        warn!(reasons = %failures.join("; "), "Falling back to CPU device");
    }
    Device::Cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_accelerators_means_cpu() {
        assert!(matches!(first_available(&[]), Device::Cpu));
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    #[test]
    fn test_cpu_only_build() {
        assert!(Accelerator::compiled().is_empty());
        assert!(matches!(select_device(), Device::Cpu));
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn test_accelerator_missing_from_build_falls_back_to_cpu() {
        assert!(matches!(first_available(&[Accelerator::Cuda]), Device::Cpu));
    }
}
