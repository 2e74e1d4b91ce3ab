// Step-driven trip replay. The cursor never owns a timer: whoever drives the
// replay calls `tick` at `PlaybackSpeed::tick_interval` and renders the frames.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::insights::aggregate::{meters_to_km, mps_to_kmh};
use crate::trip::TelemetryPoint;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlaybackSpeed {
    #[default]
    X1,
    X5,
    X10,
    X100,
}

impl PlaybackSpeed {
    pub const ALL: [PlaybackSpeed; 4] = [
        PlaybackSpeed::X1,
        PlaybackSpeed::X5,
        PlaybackSpeed::X10,
        PlaybackSpeed::X100,
    ];

    pub fn from_multiplier(multiplier: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.multiplier() == multiplier)
    }

    pub fn multiplier(&self) -> u32 {
        match self {
            PlaybackSpeed::X1 => 1,
            PlaybackSpeed::X5 => 5,
            PlaybackSpeed::X10 => 10,
            PlaybackSpeed::X100 => 100,
        }
    }

    /// Points advanced per tick; x100 skips 20 points at a 100ms cadence
    pub fn step(&self) -> usize {
        match self {
            PlaybackSpeed::X1 => 1,
            PlaybackSpeed::X5 => 5,
            PlaybackSpeed::X10 => 10,
            PlaybackSpeed::X100 => 20,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.multiplier().min(10) as u64)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpeedTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl SpeedTrend {
    fn between(previous: &TelemetryPoint, next: &TelemetryPoint) -> Self {
        if next.speed > previous.speed {
            SpeedTrend::Increasing
        } else if next.speed < previous.speed {
            SpeedTrend::Decreasing
        } else {
            SpeedTrend::Stable
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplayFrame {
    pub position: usize,
    pub speed_kmh: f64,
    pub distance_km: f64,
    pub trend: SpeedTrend,
}

#[derive(Clone, Debug)]
pub struct ReplayCursor<'trip> {
    points: &'trip [TelemetryPoint],
    position: usize,
    is_playing: bool,
    speed: PlaybackSpeed,
}

impl<'trip> ReplayCursor<'trip> {
    pub fn new(points: &'trip [TelemetryPoint]) -> Self {
        Self {
            points,
            position: 0,
            is_playing: false,
            speed: PlaybackSpeed::default(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn is_finished(&self) -> bool {
        self.points.is_empty() || self.position >= self.points.len() - 1
    }

    pub fn play(&mut self) {
        self.is_playing = !self.points.is_empty();
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn reset(&mut self) {
        self.is_playing = false;
        self.position = 0;
    }

    pub fn stop(&mut self) {
        self.reset();
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    /// Frame describing the point under the cursor, with the trend against the previous point
    pub fn current_frame(&self) -> Option<ReplayFrame> {
        let point = self.points.get(self.position)?;
        let trend = match self.position.checked_sub(1) {
            Some(previous) => SpeedTrend::between(&self.points[previous], point),
            None => SpeedTrend::Stable,
        };
        Some(self.frame_at(self.position, trend))
    }

    /// Advances playback by one step. Reaching the last point stops playback.
    pub fn tick(&mut self) -> Option<ReplayFrame> {
        if !self.is_playing {
            return None;
        }
        if self.is_finished() {
            self.is_playing = false;
            return None;
        }

        let previous = self.position;
        self.position = (previous + self.speed.step()).min(self.points.len() - 1);
        if self.is_finished() {
            self.is_playing = false;
        }

        let trend = SpeedTrend::between(&self.points[previous], &self.points[self.position]);
        Some(self.frame_at(self.position, trend))
    }

    /// Jumps to a fraction of the timeline, clamped to `[0, 1]`
    pub fn seek_fraction(&mut self, fraction: f64) -> Option<ReplayFrame> {
        if self.points.is_empty() {
            return None;
        }
        let fraction = if fraction.is_nan() { 0. } else { fraction.clamp(0., 1.) };
        self.position = (fraction * (self.points.len() - 1) as f64).floor() as usize;
        self.current_frame()
    }

    /// The frame under the cursor, then up to `ticks` played frames (every
    /// remaining frame when `None`). Leaves the cursor where playback stopped.
    pub fn play_frames(&mut self, ticks: Option<usize>) -> Vec<ReplayFrame> {
        let mut frames = self.current_frame().into_iter().collect::<Vec<_>>();
        self.play();
        frames.extend(std::iter::from_fn(|| self.tick()).take(ticks.unwrap_or(usize::MAX)));
        frames
    }

    fn frame_at(&self, position: usize, trend: SpeedTrend) -> ReplayFrame {
        let point = &self.points[position];
        ReplayFrame {
            position,
            speed_kmh: mps_to_kmh(point.speed),
            distance_km: meters_to_km(point.distance),
            trend,
        }
    }
}
