//! The original compact grasp-quality architecture.

use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig, ConvTranspose2d, ConvTranspose2dConfig};
use burn::nn::PaddingConfig2d;
use burn::prelude::Backend;
use burn::tensor::activation::relu;
use burn::tensor::Tensor;
use serde::{Deserialize, Serialize};

use crate::network::{GraspNetwork, GraspPrediction};

/// Configuration for [`Ggcnn`].
///
/// # Example
///
/// ```
/// use grasp_models::GgcnnConfig;
///
/// let config = GgcnnConfig::default();
/// assert_eq!(config.filters, [32, 16, 8]);
/// assert!(config.accepts(300, 300));
/// assert!(!config.accepts(200, 200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GgcnnConfig {
    /// Number of input channels (1 for depth-only input).
    pub input_channels: usize,

    /// Channel counts of the three encoder stages.
    pub filters: [usize; 3],
}

impl Default for GgcnnConfig {
    fn default() -> Self {
        Self {
            input_channels: 1,
            filters: [32, 16, 8],
        }
    }
}

impl GgcnnConfig {
    /// The encoder downsamples by 3·2·2; inputs must be divisible by this.
    pub const INPUT_MULTIPLE: usize = 12;

    /// Creates a configuration with the given input channel count.
    #[must_use]
    pub const fn new(input_channels: usize) -> Self {
        Self {
            input_channels,
            filters: [32, 16, 8],
        }
    }

    /// Sets the encoder channel counts.
    #[must_use]
    pub const fn with_filters(mut self, filters: [usize; 3]) -> Self {
        self.filters = filters;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.input_channels > 0
            && self.filters[0] > 0
            && self.filters[1] > 0
            && self.filters[2] > 0
    }

    /// Returns `true` if the network reproduces the given input size exactly.
    #[must_use]
    pub const fn accepts(&self, rows: usize, cols: usize) -> bool {
        rows > 0 && cols > 0 && rows % Self::INPUT_MULTIPLE == 0 && cols % Self::INPUT_MULTIPLE == 0
    }
}

/// The compact fully convolutional grasp network.
///
/// Three strided convolutions (9×9/s3, 5×5/s2, 3×3/s2) compress the depth
/// image; three mirrored transpose convolutions restore the input size; four
/// 1×1 projection heads emit the raw output channels. Output maps match the
/// input spatially, so per-pixel targets apply directly.
///
/// Input sizes must be divisible by [`GgcnnConfig::INPUT_MULTIPLE`].
///
/// # Example
///
/// ```ignore
/// use grasp_models::{Ggcnn, GgcnnConfig};
///
/// let device = Default::default();
/// let model = Ggcnn::<MyBackend>::new(GgcnnConfig::default(), &device);
/// let prediction = model.forward(depth_batch);
/// ```
#[derive(Debug, Module)]
pub struct Ggcnn<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    conv3: Conv2d<B>,
    up1: ConvTranspose2d<B>,
    up2: ConvTranspose2d<B>,
    up3: ConvTranspose2d<B>,
    pos_head: Conv2d<B>,
    cos_head: Conv2d<B>,
    sin_head: Conv2d<B>,
    width_head: Conv2d<B>,
}

impl<B: Backend> Ggcnn<B> {
    /// Creates a new network on the given device.
    #[must_use]
    pub fn new(config: GgcnnConfig, device: &B::Device) -> Self {
        let [f1, f2, f3] = config.filters;

        let conv1 = Conv2dConfig::new([config.input_channels, f1], [9, 9])
            .with_stride([3, 3])
            .with_padding(PaddingConfig2d::Explicit(3, 3))
            .init(device);
        let conv2 = Conv2dConfig::new([f1, f2], [5, 5])
            .with_stride([2, 2])
            .with_padding(PaddingConfig2d::Explicit(2, 2))
            .init(device);
        let conv3 = Conv2dConfig::new([f2, f3], [3, 3])
            .with_stride([2, 2])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);

        let up1 = ConvTranspose2dConfig::new([f3, f3], [3, 3])
            .with_stride([2, 2])
            .with_padding([1, 1])
            .with_padding_out([1, 1])
            .init(device);
        let up2 = ConvTranspose2dConfig::new([f3, f2], [5, 5])
            .with_stride([2, 2])
            .with_padding([2, 2])
            .with_padding_out([1, 1])
            .init(device);
        let up3 = ConvTranspose2dConfig::new([f2, f1], [9, 9])
            .with_stride([3, 3])
            .with_padding([3, 3])
            .init(device);

        let head = |device: &B::Device| Conv2dConfig::new([f1, 1], [1, 1]).init(device);

        Self {
            conv1,
            conv2,
            conv3,
            up1,
            up2,
            up3,
            pos_head: head(device),
            cos_head: head(device),
            sin_head: head(device),
            width_head: head(device),
        }
    }

    /// Runs the forward pass.
    ///
    /// `input` is `[batch, channels, rows, cols]` with rows/cols divisible by
    /// [`GgcnnConfig::INPUT_MULTIPLE`]; the four returned channels match the
    /// input spatially.
    pub fn forward(&self, input: Tensor<B, 4>) -> GraspPrediction<B> {
        let x = relu(self.conv1.forward(input));
        let x = relu(self.conv2.forward(x));
        let x = relu(self.conv3.forward(x));
        let x = relu(self.up1.forward(x));
        let x = relu(self.up2.forward(x));
        let x = relu(self.up3.forward(x));

        GraspPrediction {
            pos: self.pos_head.forward(x.clone()),
            cos: self.cos_head.forward(x.clone()),
            sin: self.sin_head.forward(x.clone()),
            width: self.width_head.forward(x),
        }
    }
}

impl<B: Backend> GraspNetwork<B> for Ggcnn<B> {
    fn forward(&self, input: Tensor<B, 4>) -> GraspPrediction<B> {
        Self::forward(self, input)
    }
}
