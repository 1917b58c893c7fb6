//! Offline frame driver
//!
//! Steps a [`FrameClock`] through its range, runs one timeline frame per step
//! and writes the recorded paint commands as JSON lines.

use std::io::Write;

use anyhow::{Context, Result};
use flow_animation::{FrameClock, Timeline};
use flow_paint::{PaintCommand, RecordingCanvas};
use serde::Serialize;

use crate::scene::Scene;

/// One line of the frame trace
#[derive(Debug, Serialize)]
pub struct FrameRecord<'a> {
    pub frame: i64,
    pub time: f64,
    pub commands: &'a [PaintCommand],
}

/// Render every frame left on `clock`. Returns the number of frames written.
pub fn render_frames<W: Write>(
    scene: &mut Scene,
    timeline: &Timeline,
    clock: &mut FrameClock,
    fps: u32,
    out: &mut W,
) -> Result<u64> {
    let mut canvas = RecordingCanvas::new();
    let mut written = 0;

    while clock.should_continue() {
        let frame = clock.frame();
        let time = clock.time(fps);

        timeline.frame(time, || scene.render(&mut canvas));

        let record = FrameRecord {
            frame,
            time,
            commands: canvas.commands(),
        };
        serde_json::to_writer(&mut *out, &record)
            .with_context(|| format!("Failed to write frame {}", frame))?;
        writeln!(out)?;
        tracing::trace!(frame, time, commands = record.commands.len(), "frame written");

        canvas.take_commands();
        clock.next_frame();
        written += 1;
    }

    out.flush().context("Failed to flush frame trace")?;
    Ok(written)
}
