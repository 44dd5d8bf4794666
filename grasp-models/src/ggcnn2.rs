//! The deeper dilated grasp-quality architecture.

use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig, ConvTranspose2d, ConvTranspose2dConfig};
use burn::nn::pool::{MaxPool2d, MaxPool2dConfig};
use burn::nn::PaddingConfig2d;
use burn::prelude::Backend;
use burn::tensor::activation::relu;
use burn::tensor::Tensor;
use serde::{Deserialize, Serialize};

use crate::network::{GraspNetwork, GraspPrediction};

/// Configuration for [`Ggcnn2`].
///
/// # Example
///
/// ```
/// use grasp_models::Ggcnn2Config;
///
/// let config = Ggcnn2Config::default();
/// assert_eq!(config.filters, [16, 32]);
/// assert!(config.accepts(300, 300));
/// assert!(!config.accepts(30, 30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ggcnn2Config {
    /// Number of input channels (1 for depth-only input).
    pub input_channels: usize,

    /// Channel counts of the shallow and dilated stages.
    pub filters: [usize; 2],
}

impl Default for Ggcnn2Config {
    fn default() -> Self {
        Self {
            input_channels: 1,
            filters: [16, 32],
        }
    }
}

impl Ggcnn2Config {
    /// Two 2×2 max-pool stages; inputs must be divisible by this.
    pub const INPUT_MULTIPLE: usize = 4;

    /// Creates a configuration with the given input channel count.
    #[must_use]
    pub const fn new(input_channels: usize) -> Self {
        Self {
            input_channels,
            filters: [16, 32],
        }
    }

    /// Sets the stage channel counts.
    #[must_use]
    pub const fn with_filters(mut self, filters: [usize; 2]) -> Self {
        self.filters = filters;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.input_channels > 0 && self.filters[0] > 0 && self.filters[1] > 0
    }

    /// Returns `true` if the network reproduces the given input size exactly.
    #[must_use]
    pub const fn accepts(&self, rows: usize, cols: usize) -> bool {
        rows >= 2 * Self::INPUT_MULTIPLE
            && cols >= 2 * Self::INPUT_MULTIPLE
            && rows % Self::INPUT_MULTIPLE == 0
            && cols % Self::INPUT_MULTIPLE == 0
    }
}

/// The dilated variant of the grasp network.
///
/// Stride-1 convolutions with two 2×2 max-pool reductions, dilated 5×5
/// convolutions to widen the receptive field without further downsampling,
/// then two 4×4/s2 transpose convolutions to restore the input size. As with
/// [`Ggcnn`](crate::Ggcnn), four 1×1 heads emit the raw output channels.
///
/// Input sizes must be divisible by [`Ggcnn2Config::INPUT_MULTIPLE`].
#[derive(Debug, Module)]
pub struct Ggcnn2<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    pool1: MaxPool2d,
    dilated1: Conv2d<B>,
    pool2: MaxPool2d,
    dilated2: Conv2d<B>,
    up1: ConvTranspose2d<B>,
    up2: ConvTranspose2d<B>,
    pos_head: Conv2d<B>,
    cos_head: Conv2d<B>,
    sin_head: Conv2d<B>,
    width_head: Conv2d<B>,
}

impl<B: Backend> Ggcnn2<B> {
    /// Creates a new network on the given device.
    #[must_use]
    pub fn new(config: Ggcnn2Config, device: &B::Device) -> Self {
        let [f1, f2] = config.filters;

        let conv1 = Conv2dConfig::new([config.input_channels, f1], [11, 11])
            .with_padding(PaddingConfig2d::Explicit(5, 5))
            .init(device);
        let conv2 = Conv2dConfig::new([f1, f1], [5, 5])
            .with_padding(PaddingConfig2d::Explicit(2, 2))
            .init(device);

        let pool = || MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();

        // Dilated 5x5 kernels span 9 and 17 pixels; the explicit padding
        // keeps the maps size-stable.
        let dilated1 = Conv2dConfig::new([f1, f2], [5, 5])
            .with_dilation([2, 2])
            .with_padding(PaddingConfig2d::Explicit(4, 4))
            .init(device);
        let dilated2 = Conv2dConfig::new([f2, f2], [5, 5])
            .with_dilation([4, 4])
            .with_padding(PaddingConfig2d::Explicit(8, 8))
            .init(device);

        let up1 = ConvTranspose2dConfig::new([f2, f1], [4, 4])
            .with_stride([2, 2])
            .with_padding([1, 1])
            .init(device);
        let up2 = ConvTranspose2dConfig::new([f1, f1], [4, 4])
            .with_stride([2, 2])
            .with_padding([1, 1])
            .init(device);

        let head = |device: &B::Device| Conv2dConfig::new([f1, 1], [1, 1]).init(device);

        Self {
            conv1,
            conv2,
            pool1: pool(),
            dilated1,
            pool2: pool(),
            dilated2,
            up1,
            up2,
            pos_head: head(device),
            cos_head: head(device),
            sin_head: head(device),
            width_head: head(device),
        }
    }

    /// Runs the forward pass.
    ///
    /// `input` is `[batch, channels, rows, cols]` with rows/cols divisible by
    /// [`Ggcnn2Config::INPUT_MULTIPLE`]; the four returned channels match the
    /// input spatially.
    pub fn forward(&self, input: Tensor<B, 4>) -> GraspPrediction<B> {
        let x = relu(self.conv1.forward(input));
        let x = relu(self.conv2.forward(x));
        let x = self.pool1.forward(x);
        let x = relu(self.dilated1.forward(x));
        let x = self.pool2.forward(x);
        let x = relu(self.dilated2.forward(x));
        let x = relu(self.up1.forward(x));
        let x = relu(self.up2.forward(x));

        GraspPrediction {
            pos: self.pos_head.forward(x.clone()),
            cos: self.cos_head.forward(x.clone()),
            sin: self.sin_head.forward(x.clone()),
            width: self.width_head.forward(x),
        }
    }
}

impl<B: Backend> GraspNetwork<B> for Ggcnn2<B> {
    fn forward(&self, input: Tensor<B, 4>) -> GraspPrediction<B> {
        Self::forward(self, input)
    }
}
