use super::music::Mode;
use glam::Vec3;

// Audio-to-visual mapping applied once per animation frame.

pub const VOLUME_FLOOR: f32 = 0.005;
pub const VOLUME_GAIN: f32 = 10.0;

pub const MAJOR_BACKGROUND: [u8; 3] = [252, 247, 225];
pub const MINOR_BACKGROUND_BASE: [i32; 3] = [104, 144, 219];
pub const MINOR_GRADIENT_GAIN: f32 = 20.0;
// new = old + alpha * (target - old)
pub const BACKGROUND_BLEND_ALPHA: f32 = 0.05;

pub const CUBE_SCALE_GAIN: Vec3 = Vec3::new(0.15, 0.25, 0.35);
pub const SOLID_SCALE_GAIN: f32 = 0.05;
pub const ROTATION_STEP_BASE: f64 = 0.00001;
pub const ROTATION_STEP_GAIN: f64 = 0.00000025;
pub const FRAME_OPACITY_DIVISOR: f32 = 10.0;
// Material opacity of the wireframe before the first animated frame
pub const FRAME_INITIAL_OPACITY: f32 = 0.2;

/// Color with channels in 0..=255 units (not clamped while blending).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_bytes(c: [u8; 3]) -> Self {
        Self::new(c[0] as f32, c[1] as f32, c[2] as f32)
    }

    pub fn lerp(self, target: Rgb, t: f32) -> Rgb {
        Rgb::new(
            self.r + (target.r - self.r) * t,
            self.g + (target.g - self.g) * t,
            self.b + (target.b - self.b) * t,
        )
    }

    /// Channels normalized to 0..1 (sRGB encoded).
    pub fn to_unit(self) -> [f32; 3] {
        [
            (self.r / 255.0).clamp(0.0, 1.0),
            (self.g / 255.0).clamp(0.0, 1.0),
            (self.b / 255.0).clamp(0.0, 1.0),
        ]
    }

    /// Channels decoded to linear light, as expected by an sRGB render target.
    pub fn to_linear(self) -> [f32; 3] {
        self.to_unit().map(srgb_to_linear)
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn volume_from_level(level: f32) -> f32 {
    VOLUME_FLOOR + level.max(0.0) * VOLUME_GAIN
}

/// Background color the scene drifts toward for the given mode and volume.
///
/// Minor mode shifts the base color by `floor(volume * 20)`; channels are
/// clamped to 0..=255.
pub fn target_background(mode: Mode, volume: f32) -> Rgb {
    match mode {
        Mode::Major => Rgb::from_bytes(MAJOR_BACKGROUND),
        Mode::Minor => {
            let g = (volume * MINOR_GRADIENT_GAIN).floor() as i32;
            let [r0, g0, b0] = MINOR_BACKGROUND_BASE;
            Rgb::new(
                (r0 + g).clamp(0, 255) as f32,
                (g0 - g).clamp(0, 255) as f32,
                (b0 - g).clamp(0, 255) as f32,
            )
        }
    }
}

#[inline]
pub fn blend_background(current: Rgb, target: Rgb) -> Rgb {
    current.lerp(target, BACKGROUND_BLEND_ALPHA)
}

#[inline]
pub fn cube_scale(volume: f32) -> Vec3 {
    Vec3::ONE + CUBE_SCALE_GAIN * volume
}

#[inline]
pub fn solid_scale(volume: f32) -> f32 {
    1.0 + volume * SOLID_SCALE_GAIN
}

#[inline]
pub fn rotation_step(volume: f32) -> f64 {
    ROTATION_STEP_BASE + volume as f64 * ROTATION_STEP_GAIN
}

/// Unclamped; the renderer limits it to a valid opacity.
#[inline]
pub fn frame_opacity(volume: f32) -> f32 {
    volume / FRAME_OPACITY_DIVISOR
}

/// Everything the renderer needs from the audio mapping for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameVisuals {
    pub volume: f32,
    pub background: Rgb,
    pub cube_scale: Vec3,
    pub solid_scale: f32,
    /// Accumulated rotation about x, shared by the solid, its frame and the markers.
    pub rotation_x: f64,
    pub frame_opacity: f32,
}

/// Per-frame state machine driving colors and transforms from the audio level.
#[derive(Clone, Debug)]
pub struct Visualizer {
    mode: Mode,
    visuals: FrameVisuals,
}

impl Visualizer {
    pub fn new(initial_background: Rgb) -> Self {
        Self {
            mode: Mode::Major,
            visuals: FrameVisuals {
                volume: VOLUME_FLOOR,
                background: initial_background,
                cube_scale: Vec3::ONE,
                solid_scale: 1.0,
                rotation_x: 0.0,
                frame_opacity: FRAME_INITIAL_OPACITY,
            },
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn visuals(&self) -> &FrameVisuals {
        &self.visuals
    }

    /// Advance one frame. The background always blends toward its target;
    /// transforms only change when time has actually passed.
    pub fn step(&mut self, level: f32, dt_sec: f32) -> &FrameVisuals {
        let volume = volume_from_level(level);
        let v = &mut self.visuals;
        v.volume = volume;
        v.background = blend_background(v.background, target_background(self.mode, volume));
        if dt_sec > 0.0 {
            v.cube_scale = cube_scale(volume);
            v.solid_scale = solid_scale(volume);
            v.rotation_x += rotation_step(volume);
            v.frame_opacity = frame_opacity(volume);
        }
        &self.visuals
    }
}

// ---------------- Amplitude ----------------

#[inline]
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Peak-hold RMS follower: `level = max(rms, previous * smoothing)`.
#[derive(Clone, Debug, Default)]
pub struct AmplitudeFollower {
    smoothing: f32,
    level: f32,
}

impl AmplitudeFollower {
    pub fn new(smoothing: f32) -> Self {
        Self {
            smoothing: smoothing.clamp(0.0, 0.999),
            level: 0.0,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn update(&mut self, samples: &[f32]) -> f32 {
        self.level = rms(samples).max(self.level * self.smoothing);
        self.level
    }
}
