//! Headless Runner
//!
//! Drives a field on a [`ManualHost`] and [`RecordingSurface`] for a fixed
//! number of refreshes, applying scheduled resizes along the way.

use std::str::FromStr;

use thiserror::Error;

use crate::field::ParticleField;
use crate::geometry::Viewport;
use crate::host::ManualHost;
use crate::output::{FrameLogger, OutputError};
use crate::surface::RecordingSurface;

/// A container resize to deliver before a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledResize {
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl FromStr for ScheduledResize {
    type Err = ParseResizeError;

    /// Parses `FRAME:WxH`, e.g. `120:1024x768`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, size) = s
            .split_once(':')
            .ok_or_else(|| ParseResizeError(s.to_string()))?;
        let (width, height) = size
            .split_once('x')
            .ok_or_else(|| ParseResizeError(s.to_string()))?;

        let frame = frame.trim().parse().map_err(|_| ParseResizeError(s.to_string()))?;
        let width = width.trim().parse().map_err(|_| ParseResizeError(s.to_string()))?;
        let height = height.trim().parse().map_err(|_| ParseResizeError(s.to_string()))?;

        Ok(Self {
            frame,
            width,
            height,
        })
    }
}

/// Error parsing a `FRAME:WxH` resize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid resize '{0}', expected FRAME:WxH")]
pub struct ParseResizeError(pub String);

/// Parameters of one headless run.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub viewport: Viewport,
    pub frames: u64,
    /// Log a snapshot every N frames; 0 disables
    pub snapshot_interval: u64,
    pub resizes: Vec<ScheduledResize>,
}

/// Totals reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames_rendered: u64,
    /// Frames the field asked the host for, the pending one included
    pub frames_requested: u64,
    pub resizes_applied: u32,
    pub lines_drawn: u64,
    pub snapshots_written: u64,
    pub draw_commands: u64,
}

/// Mounts `field`, renders `plan.frames` refreshes, then unmounts.
pub fn run_headless(
    field: &mut ParticleField,
    plan: &RunPlan,
    logger: &mut FrameLogger,
) -> Result<RunSummary, OutputError> {
    let mut host = ManualHost::new();
    let mut surface = RecordingSurface::new();
    let mut summary = RunSummary::default();

    let mut resizes = plan.resizes.clone();
    resizes.sort_by_key(|r| r.frame);
    let mut resizes = resizes.into_iter().peekable();

    field.mount(&mut host, &mut surface, plan.viewport);

    for frame in 0..plan.frames {
        while let Some(resize) = resizes.next_if(|r| r.frame <= frame) {
            // One notification per live listener, as a window would deliver
            for _ in host.listeners() {
                field.resize(
                    &mut surface,
                    Viewport::new(resize.width, resize.height, plan.viewport.device_pixel_ratio),
                );
                summary.resizes_applied += 1;
            }
        }

        let Some(handle) = host.next_frame() else {
            tracing::warn!("No frame pending at refresh {}", frame);
            break;
        };
        if let Some(stats) = field.on_frame(handle, &mut host, &mut surface) {
            summary.frames_rendered += 1;
            summary.lines_drawn += u64::from(stats.lines_drawn);
        }

        if plan.snapshot_interval > 0 && field.frame() % plan.snapshot_interval == 0 {
            logger.log(&field.snapshot())?;
            summary.snapshots_written += 1;
        }

        summary.draw_commands += surface.take_commands().len() as u64;
    }

    summary.frames_requested = host.frames_requested();
    field.unmount(&mut host);
    logger.flush()?;

    tracing::debug!("Headless run finished: {:?}", summary);
    Ok(summary)
}
