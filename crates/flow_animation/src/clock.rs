//! Frame clock
//!
//! Converts a frame counter into timeline time for offline rendering. The clock
//! covers either a finite range `[start, end)` of frames or runs forever from a
//! start frame.

/// Frame counter driving a timeline at a fixed frame rate
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameClock {
    start: i64,
    /// Exclusive end frame, `None` when running forever
    end: Option<i64>,
    frame: i64,
    offset: f32,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock covering `[start, end)`, positioned at `start`
    pub fn with_range(start: i64, end: i64) -> Self {
        let mut clock = Self::new();
        clock.set_range(start, end);
        clock
    }

    /// Cover the frames `[start, end)` and move to `start`
    pub fn set_range(&mut self, start: i64, end: i64) {
        self.start = start;
        self.end = Some(end);
        self.frame = start;
        self.offset = 0.0;
    }

    /// Run forever from `start`
    pub fn set_infinitely_from(&mut self, start: i64) {
        self.start = start;
        self.end = None;
        self.frame = self.frame.max(start);
    }

    pub fn start_frame(&self) -> i64 {
        self.start
    }

    pub fn end_frame(&self) -> Option<i64> {
        self.end
    }

    pub fn frame(&self) -> i64 {
        self.frame
    }

    /// Sub-frame offset, in frames
    pub fn frame_offset(&self) -> f32 {
        self.offset
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }

    /// Jump back to the start frame
    pub fn replay(&mut self) {
        self.frame = self.start;
        self.offset = 0.0;
    }

    /// Advance one frame unless paused. A clock behind its start frame snaps
    /// to it first.
    pub fn next_frame(&mut self) {
        if self.frame < self.start {
            self.frame = self.start;
            self.offset = 0.0;
        }
        if !self.paused {
            self.frame += 1;
            self.offset = 0.0;
        }
    }

    /// Move to `frame` plus a sub-frame offset. Frames before the start clamp
    /// to the start with no offset.
    pub fn set_frame(&mut self, frame: i64, offset: f32) {
        if frame < self.start {
            self.frame = self.start;
            self.offset = 0.0;
        } else {
            self.frame = frame;
            self.offset = offset;
        }
    }

    /// Timeline time of the current frame
    pub fn time(&self, fps: u32) -> f64 {
        (self.frame as f64 + self.offset as f64) / fps.max(1) as f64
    }

    /// Whether the current frame is still inside the range
    pub fn should_continue(&self) -> bool {
        match self.end {
            Some(end) => end > self.start && self.frame < end,
            None => true,
        }
    }
}
