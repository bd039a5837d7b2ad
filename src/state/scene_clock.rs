//! Scene animation clock
//!
//! Per-frame state for the celestial backdrop. The renderer only reads
//! [`SceneFrame`] snapshots; everything that moves is derived from the shared
//! accumulator `t` and the static body table.

use serde::Serialize;

use crate::celestial::{BODIES, BODY_COUNT};

/// Accumulator step per frame while the countdown runs
pub const RUNNING_STEP: f64 = 0.01;
/// Accumulator step per frame otherwise
pub const IDLE_STEP: f64 = 0.002;
/// Converts `1 / period_hours` into radians per unit of `t`
pub const ORBIT_SCALE: f64 = 40.0;

pub const CORE_SPIN_X: f64 = 0.001;
pub const CORE_SPIN_Y: f64 = 0.002;

pub const CAMERA_ORBIT_RATE: f64 = 0.05;
pub const CAMERA_TILT_RATE: f64 = 0.03;
pub const CAMERA_TILT_AMPLITUDE: f64 = 0.25;
pub const PARALLAX_STRENGTH: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub aspect: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            aspect: width as f64 / height as f64,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub azimuth: f64,
    pub tilt: f64,
    pub parallax_x: f64,
    pub parallax_y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyFrame {
    pub name: &'static str,
    pub angle: f64,
    pub orbit_radius: f64,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct SceneFrame {
    pub t: f64,
    pub frame: u64,
    pub camera: CameraPose,
    pub core_rotation: (f64, f64),
    pub bodies: Vec<BodyFrame>,
    pub viewport: Viewport,
}

#[derive(Debug, Clone)]
pub struct SceneClock {
    t: f64,
    frame: u64,
    core_rotation: (f64, f64),
    body_angles: [f64; BODY_COUNT],
    pointer: (f64, f64),
    viewport: Viewport,
}

impl SceneClock {
    pub fn new() -> Self {
        Self {
            t: 0.0,
            frame: 0,
            core_rotation: (0.0, 0.0),
            body_angles: [0.0; BODY_COUNT],
            pointer: (0.0, 0.0),
            viewport: Viewport::default(),
        }
    }

    /// Accumulator step for the next frame
    pub fn frame_delta(running: bool) -> f64 {
        if running { RUNNING_STEP } else { IDLE_STEP }
    }

    /// Advance by one frame at the speed matching `running`
    pub fn step(&mut self, running: bool) -> f64 {
        let delta = Self::frame_delta(running);
        self.advance(delta);
        delta
    }

    pub fn advance(&mut self, delta: f64) {
        self.t += delta;
        self.frame += 1;

        // Fixed per-frame spin, independent of delta
        self.core_rotation.0 += CORE_SPIN_X;
        self.core_rotation.1 += CORE_SPIN_Y;

        for (angle, body) in self.body_angles.iter_mut().zip(BODIES.iter()) {
            *angle += (1.0 / body.orbital_period_hours) * ORBIT_SCALE * delta;
        }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn body_angle(&self, index: usize) -> Option<f64> {
        self.body_angles.get(index).copied()
    }

    pub fn camera(&self) -> CameraPose {
        CameraPose {
            azimuth: self.t * CAMERA_ORBIT_RATE,
            tilt: (self.t * CAMERA_TILT_RATE).sin() * CAMERA_TILT_AMPLITUDE,
            parallax_x: self.pointer.0 * PARALLAX_STRENGTH,
            parallax_y: self.pointer.1 * PARALLAX_STRENGTH,
        }
    }

    /// Recompute the viewport; the accumulator and angles are untouched
    pub fn resize(&mut self, width: u32, height: u32) -> Viewport {
        self.viewport = Viewport::new(width, height);
        self.viewport
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Store a normalized pointer position, clamped to [-1, 1]
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        let clamp = |v: f64| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        self.pointer = (clamp(x), clamp(y));
    }

    pub fn snapshot(&self) -> SceneFrame {
        SceneFrame {
            t: self.t,
            frame: self.frame,
            camera: self.camera(),
            core_rotation: self.core_rotation,
            bodies: BODIES
                .iter()
                .zip(self.body_angles.iter())
                .map(|(body, &angle)| BodyFrame {
                    name: body.name,
                    angle,
                    orbit_radius: body.display.orbit_radius,
                })
                .collect(),
            viewport: self.viewport,
        }
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::new()
    }
}
