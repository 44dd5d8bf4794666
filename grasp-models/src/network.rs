//! Network output types and the architecture seam.

use burn::prelude::Backend;
use burn::tensor::Tensor;
use grasp_types::{GraspMap, OutputMaps};

use crate::error::{ModelError, Result};

/// The four raw output channels of a grasp network.
///
/// Each tensor has shape `[batch, 1, rows, cols]`. The channels regress the
/// position confidence map, the doubled-angle cos/sin maps, and the
/// normalized width map; no output activation is applied — decoding and loss
/// both consume the raw values.
#[derive(Debug, Clone)]
pub struct GraspPrediction<B: Backend> {
    /// Position confidence channel.
    pub pos: Tensor<B, 4>,
    /// Doubled-angle cosine channel.
    pub cos: Tensor<B, 4>,
    /// Doubled-angle sine channel.
    pub sin: Tensor<B, 4>,
    /// Normalized width channel.
    pub width: Tensor<B, 4>,
}

impl<B: Backend> GraspPrediction<B> {
    /// Returns the batch size.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.pos.dims()[0]
    }

    /// Returns the spatial `(rows, cols)` of the output maps.
    #[must_use]
    pub fn spatial_dims(&self) -> (usize, usize) {
        let [_, _, rows, cols] = self.pos.dims();
        (rows, cols)
    }

    /// Transfers one image's output channels to host memory.
    ///
    /// This is the single device→host crossing point: everything downstream
    /// (decode, candidate extraction, evaluation) operates on the returned
    /// plain [`OutputMaps`], regardless of where the forward pass ran.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::BatchIndex` if `batch_index` is out of range, or
    /// `ModelError::HostTransfer` if reading tensor data back fails.
    pub fn to_output_maps(&self, batch_index: usize) -> Result<OutputMaps> {
        let [batch, _, rows, cols] = self.pos.dims();
        if batch_index >= batch {
            return Err(ModelError::BatchIndex {
                index: batch_index,
                batch,
            });
        }

        let to_map = |tensor: &Tensor<B, 4>| -> Result<GraspMap> {
            let data = tensor
                .clone()
                .slice([batch_index..batch_index + 1, 0..1, 0..rows, 0..cols])
                .into_data()
                .to_vec::<f32>()
                .map_err(|e| ModelError::host_transfer(format!("{e:?}")))?;
            GraspMap::try_new(rows, cols, data)
                .map_err(|e| ModelError::host_transfer(e.to_string()))
        };

        let pos = to_map(&self.pos)?;
        let cos = to_map(&self.cos)?;
        let sin = to_map(&self.sin)?;
        let width = to_map(&self.width)?;
        OutputMaps::try_new(pos, cos, sin, width)
            .map_err(|e| ModelError::host_transfer(e.to_string()))
    }
}

/// The seam between training code and concrete grasp architectures.
///
/// A grasp network maps a depth image batch `[batch, channels, rows, cols]`
/// to four spatially matching raw output channels. The training crate only
/// ever sees this trait.
pub trait GraspNetwork<B: Backend> {
    /// Runs the forward pass.
    fn forward(&self, input: Tensor<B, 4>) -> GraspPrediction<B>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn prediction(batch: usize, rows: usize, cols: usize) -> GraspPrediction<TestBackend> {
        let device = <TestBackend as Backend>::Device::default();
        GraspPrediction {
            pos: Tensor::ones([batch, 1, rows, cols], &device),
            cos: Tensor::zeros([batch, 1, rows, cols], &device),
            sin: Tensor::zeros([batch, 1, rows, cols], &device),
            width: Tensor::ones([batch, 1, rows, cols], &device) * 0.5,
        }
    }

    #[test]
    fn prediction_dims() {
        let pred = prediction(2, 8, 6);
        assert_eq!(pred.batch_size(), 2);
        assert_eq!(pred.spatial_dims(), (8, 6));
    }

    #[test]
    fn prediction_to_output_maps() {
        let pred = prediction(2, 4, 4);
        let maps = pred.to_output_maps(1);
        assert!(maps.is_ok());
        if let Ok(maps) = maps {
            assert_eq!(maps.shape(), (4, 4));
            assert!((maps.pos().get(0, 0) - 1.0).abs() < 1e-6);
            assert!((maps.width().get(3, 3) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn prediction_batch_index_out_of_range() {
        let pred = prediction(2, 4, 4);
        let result = pred.to_output_maps(2);
        assert!(matches!(result, Err(ModelError::BatchIndex { .. })));
    }
}
