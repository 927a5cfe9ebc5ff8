use std::{
    io::Read,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::{FrameIndex, Rgba8},
        error::{HeartwaveError, HeartwaveResult},
        math::mul_div255_u16,
    },
    render::surface::FrameRGBA,
};

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Replace an existing file.
    pub overwrite: bool,
    /// Color translucent pixels are flattened over.
    pub background: Rgba8,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::opaque(255, 255, 255),
        }
    }
}

/// Streams opaque RGBA frames into the system `ffmpeg` and writes an H.264 MP4.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    fn command(&self, cfg: SinkConfig) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);
        cmd
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> HeartwaveResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(HeartwaveError::validation(
                "mp4 output width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(HeartwaveError::validation(
                "mp4 output width/height must be even (yuv420p)",
            ));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(HeartwaveError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(HeartwaveError::encode(
                "ffmpeg is required for MP4 output but was not found on PATH",
            ));
        }

        let mut child = self
            .command(cfg)
            .spawn()
            .map_err(|e| HeartwaveError::encode(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HeartwaveError::encode("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| HeartwaveError::encode("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "ffmpeg started"
        );
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HeartwaveResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| HeartwaveError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(HeartwaveError::encode("out-of-order frame index"));
        }
        self.last_idx = Some(idx);
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(HeartwaveError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        flatten_to_opaque(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.opts.background,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(HeartwaveError::encode("ffmpeg sink is already finalized"));
        };
        use std::io::Write as _;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| HeartwaveError::encode(format!("failed to write frame to ffmpeg: {e}")))
    }

    fn end(&mut self) -> HeartwaveResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| HeartwaveError::encode("ffmpeg sink not started"))?;
        let status = child
            .wait()
            .map_err(|e| HeartwaveError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| HeartwaveError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| HeartwaveError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        self.cfg = None;
        if !status.success() {
            return Err(HeartwaveError::encode(format!(
                "ffmpeg exited with status {status}: {}",
                String::from_utf8_lossy(&stderr).trim()
            )));
        }
        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg finished");
        Ok(())
    }
}

/// Composite RGBA8 `src` over `background` into fully opaque `dst`.
pub(crate) fn flatten_to_opaque(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    background: Rgba8,
) -> HeartwaveResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HeartwaveError::validation(
            "flatten_to_opaque expects equal-length rgba8 buffers",
        ));
    }
    let bg = [
        u16::from(background.r),
        u16::from(background.g),
        u16::from(background.b),
    ];

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for i in 0..3 {
            let c = if src_is_premul {
                u16::from(s[i])
            } else {
                mul_div255_u16(u16::from(s[i]), a)
            };
            d[i] = (c + mul_div255_u16(bg[i], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> HeartwaveResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// `true` when `ffmpeg -version` runs successfully.
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
