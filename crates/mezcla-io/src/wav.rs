//! WAV file reading into stereo frames.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use mezcla_core::Frame;

use crate::Result;

/// Read a WAV file as stereo frames, returning the frames and the file's
/// sample rate.
///
/// Integer PCM is normalized to [-1, 1] by bit depth. Mono files are
/// duplicated to both channels; files with more than two channels keep only
/// the first two.
pub fn read_wav_frames<P: AsRef<Path>>(path: P) -> Result<(Vec<Frame>, u32)> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = match channels {
        0 => Vec::new(),
        1 => samples.iter().map(|&s| [s, s]).collect(),
        _ => samples
            .chunks(channels)
            .map(|chunk| [chunk[0], chunk.get(1).copied().unwrap_or(chunk[0])])
            .collect(),
    };

    Ok((frames, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_wav(path: &Path, channels: u16, samples: &[f32]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn mono_duplicates_to_both_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_test_wav(&path, 1, &[0.1, -0.2, 0.3]);

        let (frames, sample_rate) = read_wav_frames(&path).unwrap();
        assert_eq!(sample_rate, 48000);
        assert_eq!(frames, vec![[0.1, 0.1], [-0.2, -0.2], [0.3, 0.3]]);
    }

    #[test]
    fn stereo_deinterleaves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_test_wav(&path, 2, &[0.1, -0.1, 0.2, -0.2]);

        let (frames, _) = read_wav_frames(&path).unwrap();
        assert_eq!(frames, vec![[0.1, -0.1], [0.2, -0.2]]);
    }

    #[test]
    fn extra_channels_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.wav");
        write_test_wav(&path, 4, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);

        let (frames, _) = read_wav_frames(&path).unwrap();
        assert_eq!(frames, vec![[0.1, 0.2], [0.5, 0.6]]);
    }

    #[test]
    fn int16_pcm_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pcm.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(i16::MAX).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(i16::MIN).unwrap();
        writer.finalize().unwrap();

        let (frames, sample_rate) = read_wav_frames(&path).unwrap();
        assert_eq!(sample_rate, 44100);
        assert!((frames[0][0] - 1.0).abs() < 1e-4);
        assert_eq!(frames[1][0], 0.0);
        assert_eq!(frames[2][0], -1.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_wav_frames("/nonexistent/missing.wav").is_err());
    }
}
