use std::io::{self, Cursor, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{ConvertError, Result};

/// Size of the canonical RIFF/WAVE header written by `encode_wav`.
pub const WAV_HEADER_LEN: usize = 44;

const PCM_FORMAT: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Decoded audio: one sample plane per channel, samples nominally in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedAudio {
    pub channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Samples per channel, taken from the first plane.
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}

pub trait AudioDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio>;
}

/// Decoder backed by symphonia: WAV (PCM), Ogg Vorbis and MP3 streams.
///
/// The container is probed from the bytes themselves. Packets that fail to
/// decode are skipped with a warning; every other failure aborts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio> {
        decode_stream(bytes)
            .map_err(|e| ConvertError::Encode(format!("Audio conversion failed: {e}")))
    }
}

fn decode_stream(bytes: &[u8]) -> std::result::Result<DecodedAudio, SymphoniaError> {
    let source = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());
    let probed = symphonia::default::get_probe().format(
        &Hint::new(),
        source,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut reader = probed.format;

    let track = reader
        .tracks()
        .iter()
        .find(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(SymphoniaError::Unsupported("no audio track"))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut channels: Vec<Vec<f32>> = Vec::new();
    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(message)) => {
                tracing::warn!("Skipping undecodable audio packet: {}", message);
                continue;
            }
            Err(e) => return Err(e),
        };

        let spec = *decoded.spec();
        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }
        sample_rate = spec.rate;

        // Planar copy: each channel's samples are contiguous.
        let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buffer.copy_planar_ref(decoded);

        let channel_count = spec.channels.count();
        if channels.len() < channel_count {
            channels.resize_with(channel_count, Vec::new);
        }
        for (plane, samples) in channels.iter_mut().zip(buffer.samples().chunks(frames)) {
            plane.extend_from_slice(samples);
        }
    }

    Ok(DecodedAudio {
        channels,
        sample_rate,
    })
}

/// Packages decoded planes as a 16-bit PCM WAV file.
///
/// Output length is always `44 + frames * channels * 2`. Samples are clamped
/// to `[-1, 1]` and scaled by `0x8000` (negative) or `0x7FFF` (non-negative);
/// a plane shorter than the first one is padded with silence.
pub fn encode_wav(audio: &DecodedAudio) -> Result<Vec<u8>> {
    let channel_count = audio.channels.len();
    if channel_count == 0 {
        return Err(ConvertError::Encode("Audio has no channels".to_string()));
    }
    let channels = u16::try_from(channel_count)
        .ok()
        .filter(|channels| channels.checked_mul(BITS_PER_SAMPLE / 8).is_some())
        .ok_or_else(|| ConvertError::Encode(format!("Too many channels: {}", channel_count)))?;

    let frames = audio.frame_count();
    let data_len = frames
        .checked_mul(channel_count * 2)
        .and_then(|len| u32::try_from(len).ok())
        .filter(|len| len.checked_add(36).is_some())
        .ok_or_else(|| ConvertError::Encode("Audio too long for a WAV container".to_string()))?;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);
    write_wav(&mut out, audio, channels, data_len)
        .map_err(|e| ConvertError::Encode(format!("Audio encoding failed: {e}")))?;
    Ok(out)
}

fn write_wav<W: Write>(out: &mut W, audio: &DecodedAudio, channels: u16, data_len: u32) -> io::Result<()> {
    let block_align = channels * (BITS_PER_SAMPLE / 8);
    let byte_rate = audio.sample_rate.wrapping_mul(block_align as u32);

    out.write_all(b"RIFF")?;
    out.write_u32::<LittleEndian>(36 + data_len)?;
    out.write_all(b"WAVE")?;
    out.write_all(b"fmt ")?;
    out.write_u32::<LittleEndian>(16)?;
    out.write_u16::<LittleEndian>(PCM_FORMAT)?;
    out.write_u16::<LittleEndian>(channels)?;
    out.write_u32::<LittleEndian>(audio.sample_rate)?;
    out.write_u32::<LittleEndian>(byte_rate)?;
    out.write_u16::<LittleEndian>(block_align)?;
    out.write_u16::<LittleEndian>(BITS_PER_SAMPLE)?;
    out.write_all(b"data")?;
    out.write_u32::<LittleEndian>(data_len)?;

    for frame in 0..audio.frame_count() {
        for plane in &audio.channels {
            let sample = plane.get(frame).copied().unwrap_or(0.0);
            out.write_i16::<LittleEndian>(sample_to_i16(sample))?;
        }
    }
    Ok(())
}

fn sample_to_i16(sample: f32) -> i16 {
    let sample = sample.clamp(-1.0, 1.0);
    if sample < 0.0 {
        (sample * 32768.0) as i16
    } else {
        (sample * 32767.0) as i16
    }
}

/// MPEG-1 Layer III frames (44.1 kHz, 128 kbit/s, stereo) whose side
/// information and main data are all zero, which decode to silence.
#[cfg(test)]
pub(crate) fn silent_mp3(frame_count: usize) -> Vec<u8> {
    const FRAME_LEN: usize = 417;
    let mut bytes = Vec::with_capacity(FRAME_LEN * frame_count);
    for _ in 0..frame_count {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
        bytes.extend_from_slice(&frame);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo() -> DecodedAudio {
        DecodedAudio {
            channels: vec![vec![0.0, 1.0, -1.0], vec![0.5, 2.0, -0.5]],
            sample_rate: 44100,
        }
    }

    #[test]
    fn test_wav_length() -> Result<()> {
        let wav = encode_wav(&stereo())?;
        assert_eq!(wav.len(), 44 + 3 * 2 * 2);

        let mono = DecodedAudio {
            channels: vec![vec![0.25; 1000]],
            sample_rate: 8000,
        };
        assert_eq!(encode_wav(&mono)?.len(), 44 + 1000 * 2);
        Ok(())
    }

    #[test]
    fn test_wav_header_fields() -> Result<()> {
        let wav = encode_wav(&stereo())?;
        let u16_at = |i: usize| u16::from_le_bytes([wav[i], wav[i + 1]]);
        let u32_at = |i: usize| u32::from_le_bytes([wav[i], wav[i + 1], wav[i + 2], wav[i + 3]]);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(4), 36 + 12);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(16), 16);
        assert_eq!(u16_at(20), 1);
        assert_eq!(u16_at(22), 2);
        assert_eq!(u32_at(24), 44100);
        assert_eq!(u32_at(28), 44100 * 2 * 2);
        assert_eq!(u16_at(32), 4);
        assert_eq!(u16_at(34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(40), 12);
        Ok(())
    }

    #[test]
    fn test_wav_samples_interleaved_and_clamped() -> Result<()> {
        let wav = encode_wav(&stereo())?;
        let samples: Vec<i16> = wav[44..]
            .chunks(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        assert_eq!(samples, vec![0, 16383, 32767, 32767, -32768, -16384]);
        Ok(())
    }

    #[test]
    fn test_wav_short_plane_is_padded() -> Result<()> {
        let audio = DecodedAudio {
            channels: vec![vec![0.1, 0.2], vec![]],
            sample_rate: 22050,
        };
        let wav = encode_wav(&audio)?;
        assert_eq!(wav.len(), 44 + 2 * 2 * 2);
        assert_eq!(&wav[46..48], &[0, 0]);
        Ok(())
    }

    #[test]
    fn test_wav_without_channels_fails() {
        let result = encode_wav(&DecodedAudio::default());
        assert!(matches!(result, Err(ConvertError::Encode(_))));
    }

    #[test]
    fn test_decode_own_output() -> Result<()> {
        let wav = encode_wav(&stereo())?;
        let decoded = SymphoniaDecoder.decode(&wav)?;
        assert_eq!(decoded.sample_rate, 44100);
        assert_eq!(decoded.channels.len(), 2);
        assert_eq!(decoded.frame_count(), 3);
        assert!((decoded.channels[0][1] - 1.0).abs() < 1e-3);
        assert!((decoded.channels[0][2] + 1.0).abs() < 1e-3);

        let again = encode_wav(&decoded)?;
        assert_eq!(again.len(), wav.len());
        assert_eq!(&again[..44], &wav[..44]);
        Ok(())
    }

    #[test]
    fn test_decode_mp3() -> Result<()> {
        let decoded = SymphoniaDecoder.decode(&silent_mp3(8))?;
        assert_eq!(decoded.sample_rate, 44100);
        assert_eq!(decoded.channels.len(), 2);
        assert!(decoded.frame_count() >= 1152);
        assert!(decoded
            .channels
            .iter()
            .flatten()
            .all(|sample| sample.abs() < 1e-6));

        let wav = encode_wav(&decoded)?;
        assert_eq!(wav.len(), WAV_HEADER_LEN + decoded.frame_count() * 2 * 2);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            SymphoniaDecoder.decode(&[0xFF, 0xFB, 0x90, 0x00]),
            Err(ConvertError::Encode(_))
        ));
        assert!(matches!(
            SymphoniaDecoder.decode(b"not audio at all"),
            Err(ConvertError::Encode(_))
        ));
        assert!(matches!(SymphoniaDecoder.decode(b""), Err(ConvertError::Encode(_))));
    }
}
