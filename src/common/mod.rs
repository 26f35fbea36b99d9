//! Common types shared between the encoder and decoder sides of the codec.

pub mod block;
pub mod codebook;
pub mod plane;
pub mod types;

pub use block::{blocks, Block, Blocks};
pub use codebook::Codebook;
pub use plane::{clamp_u8, Image, Plane};
pub use types::{CompressedPlane, IndexGrid};
