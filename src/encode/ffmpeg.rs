use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::encode::sink::FRAME_PATTERN;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// Video encoder settings passed through to `ffmpeg`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderSettings {
    pub codec: String,
    pub pixel_format: String,
    pub crf: u8,
    pub preset: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            codec: "libx264".to_owned(),
            pixel_format: "yuv420p".to_owned(),
            crf: 20,
            preset: "slow".to_owned(),
        }
    }
}

/// One encoder run over a PNG still sequence.
#[derive(Clone, Debug)]
pub struct EncodeJob<'a> {
    /// Directory holding `frame_%04d.png`.
    pub frames_dir: &'a Path,
    pub fps: Fps,
    pub output: &'a Path,
    pub settings: &'a EncoderSettings,
}

impl EncodeJob<'_> {
    /// Arguments after the program name.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-y".to_owned(),
            "-loglevel".to_owned(),
            "error".to_owned(),
            "-framerate".to_owned(),
            self.fps.to_ffmpeg_rate(),
            "-i".to_owned(),
            self.frames_dir.join(FRAME_PATTERN).to_string_lossy().into_owned(),
            "-c:v".to_owned(),
            self.settings.codec.clone(),
            "-pix_fmt".to_owned(),
            self.settings.pixel_format.clone(),
            "-crf".to_owned(),
            self.settings.crf.to_string(),
            "-preset".to_owned(),
            self.settings.preset.clone(),
            self.output.to_string_lossy().into_owned(),
        ]
    }

    /// Run `ffmpeg` to completion. Every failure is an [`ReelError::Encode`] naming the frames.
    #[tracing::instrument(skip_all, fields(output = %self.output.display()))]
    pub fn run(&self) -> ReelResult<()> {
        self.run_with_program("ffmpeg")
    }

    pub(crate) fn run_with_program(&self, program: &str) -> ReelResult<()> {
        let fail = |reason: String| ReelError::encode(reason, self.frames_dir);

        ensure_parent_dir(self.output).map_err(|e| fail(e.to_string()))?;

        let mut child = Command::new(program)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| fail(format!("failed to spawn {program} (is it installed and on PATH?): {e}")))?;

        let mut stderr_bytes = Vec::new();
        if let Some(mut stderr) = child.stderr.take() {
            stderr
                .read_to_end(&mut stderr_bytes)
                .map_err(|e| fail(format!("{program} stderr read failed: {e}")))?;
        }
        let status = child
            .wait()
            .map_err(|e| fail(format!("failed to wait for {program} to finish: {e}")))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(fail(format!(
                "{program} exited with status {status}: {}",
                stderr.trim()
            )));
        }
        tracing::info!("video encoded");
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
