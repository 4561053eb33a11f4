use super::constants::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_Z};
use glam::{Mat4, Quat, Vec2, Vec3};

/// Right-handed perspective camera that always looks at `target`.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Translate the eye by `step` and re-aim at the origin.
    pub fn drift(&mut self, step: Vec3) {
        self.eye += step;
        self.target = Vec3::ZERO;
    }
}

/// Starting eye position: offset by half the viewport, pulled back on z.
pub fn initial_eye(viewport_width: f32, viewport_height: f32) -> Vec3 {
    Vec3::new(viewport_width * 0.5, viewport_height * 0.5, CAMERA_START_Z)
}

/// Map a pointer position (CSS px, relative to the element) onto the
/// trackball plane: origin at the center, +y up, both axes scaled by half the
/// width.
pub fn pointer_on_circle(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    let half_w = (width * 0.5).max(1.0);
    Vec2::new((x - width * 0.5) / half_w, (height * 0.5 - y) / half_w)
}

#[derive(Clone, Debug)]
pub struct TrackballParams {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Fraction of the remaining motion consumed per reference frame.
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub reference_fps: f32,
}

/// Orbit-style controls: pointer drags rotate the eye around the target,
/// wheel zooms, motion decays with damping, distance stays within bounds.
#[derive(Clone, Debug)]
pub struct TrackballControls {
    params: TrackballParams,
    rotate: Vec2,
    zoom: f32,
    last_pointer: Option<Vec2>,
}

impl TrackballControls {
    pub fn new(params: TrackballParams) -> Self {
        Self {
            params,
            rotate: Vec2::ZERO,
            zoom: 0.0,
            last_pointer: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.last_pointer.is_some()
    }

    pub fn pointer_down(&mut self, p: Vec2) {
        self.last_pointer = Some(p);
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        if let Some(last) = self.last_pointer {
            self.rotate += p - last;
            self.last_pointer = Some(p);
        }
    }

    pub fn pointer_up(&mut self) {
        self.last_pointer = None;
    }

    /// Positive amounts zoom out.
    pub fn wheel(&mut self, amount: f32) {
        self.zoom += amount;
    }

    pub fn update(&mut self, camera: &mut Camera, dt_sec: f32) {
        let p = &self.params;
        let mut eye = camera.eye - camera.target;
        let decay = (1.0 - p.damping.clamp(0.0, 1.0)).powf(dt_sec.max(0.0) * p.reference_fps);

        let angle = self.rotate.length() * p.rotate_speed;
        if angle > 0.0 {
            let eye_dir = eye.normalize_or_zero();
            let up_dir = camera.up.normalize_or_zero();
            let side = up_dir.cross(eye_dir).normalize_or_zero();
            let move_dir = up_dir * self.rotate.y + side * self.rotate.x;
            let axis = move_dir.cross(eye).normalize_or_zero();
            if axis != Vec3::ZERO {
                let q = Quat::from_axis_angle(axis, angle);
                eye = q * eye;
                camera.up = q * camera.up;
            }
            self.rotate *= decay;
        }

        if self.zoom != 0.0 {
            let factor = 1.0 + self.zoom * p.zoom_speed;
            if factor > 0.0 {
                eye *= factor;
            }
            self.zoom *= decay;
        }

        let dist = eye.length();
        if dist > p.max_distance {
            eye *= p.max_distance / dist;
        } else if dist > 0.0 && dist < p.min_distance {
            eye *= p.min_distance / dist;
        }
        camera.eye = camera.target + eye;
    }
}
