//! Encoding side of the codec: codebook training and forward quantization.

pub mod quantize;
pub mod trainer;

pub use quantize::compress_plane;
pub use trainer::{CodebookTrainer, TrainStats};
