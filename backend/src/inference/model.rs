use std::path::Path;

use log::info;
use tch::nn::ModuleT;
use tch::{CModule, Device, Kind, TchError};

use crate::config::ModelConfig;
use crate::error::ApiError;

use super::labels::{Diagnosis, shape_result};
use super::preprocess::tensor_from_path;

/// Pre-trained leaf classifier. The TorchScript module is loaded once at
/// startup and shared across requests behind a mutex.
pub struct Classifier {
    module: CModule,
    image_size: u32,
}

impl Classifier {
    pub fn load(config: &ModelConfig) -> Result<Self, TchError> {
        let device = Device::cuda_if_available();
        let module = CModule::load_on_device(&config.path, device)?;
        info!("Classifier loaded from {} on {:?}", config.path, device);
        Ok(Self {
            module,
            image_size: config.image_size,
        })
    }

    /// Run a single forward pass over the image at `path` and shape the
    /// softmax output into a [`Diagnosis`].
    pub fn analyze(&self, path: &Path) -> Result<Diagnosis, ApiError> {
        let input = tensor_from_path(path, self.image_size)?;
        let output = self.module.forward_t(&input, false);
        let flat = output.softmax(-1, Kind::Float).view([-1]);
        let probabilities = Vec::<f32>::try_from(&flat)?;
        shape_result(&probabilities)
    }
}
