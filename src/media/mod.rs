//! Codec collaborators for the image and audio families.
//!
//! The converter only chooses target tags and packaging; pixel and sample
//! codecs sit behind the `ImageCodec` and `AudioDecoder` traits so callers can
//! inject their own.

pub mod audio;
pub mod image;

pub use self::audio::{encode_wav, AudioDecoder, DecodedAudio, SymphoniaDecoder};
pub use self::image::{ImageCodec, PixelBuffer, RasterCodec, IMAGE_QUALITY};
