use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{Transcoder, TranscoderError};
use crate::domain::TimeRange;

/// Shells out to ffmpeg for cutting and ffprobe for duration measurement.
///
/// Binary paths are configurable so deployments can pin a specific build;
/// both default to whatever the PATH resolves.
pub struct FfmpegTranscoder {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: impl Into<String>, ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    #[tracing::instrument(skip(self, input, output))]
    async fn cut(
        &self,
        input: &Path,
        output: &Path,
        range: &TimeRange,
    ) -> Result<(), TranscoderError> {
        let result = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-ss", range.start(), "-to", range.end()])
            // drop video, fixed lossy audio codec at a fixed quality, force overwrite
            .args(["-vn", "-acodec", "libmp3lame", "-q:a", "2", "-y"])
            .arg(output)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                TranscoderError::TranscodeFailed(format!(
                    "failed to launch {}: {e}",
                    self.ffmpeg_path
                ))
            })?;

        if !result.status.success() {
            let mut captured = String::from_utf8_lossy(&result.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&result.stderr));
            return Err(TranscoderError::TranscodeFailed(format!(
                "{} exited with {}: {}",
                self.ffmpeg_path,
                result.status,
                captured.trim()
            )));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, path))]
    async fn probe_duration(&self, path: &Path) -> Result<f64, TranscoderError> {
        let result = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                TranscoderError::DurationProbeFailed(format!(
                    "failed to launch {}: {e}",
                    self.ffprobe_path
                ))
            })?;

        if !result.status.success() {
            return Err(TranscoderError::DurationProbeFailed(format!(
                "{} exited with {}: {}",
                self.ffprobe_path,
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        parse_duration(&String::from_utf8_lossy(&result.stdout))
    }
}

/// Parse ffprobe's single-line `format=duration` output.
fn parse_duration(output: &str) -> Result<f64, TranscoderError> {
    output.trim().parse::<f64>().map_err(|_| {
        TranscoderError::DurationProbeFailed(format!("could not parse duration from {output:?}"))
    })
}
