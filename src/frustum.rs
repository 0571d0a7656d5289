use glam::{Quat, Vec3};

/// World-space corners of the camera's view frame at unit reference distance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewFrame {
    pub top_left: Vec3,
    pub top_right: Vec3,
    pub bottom_left: Vec3,
    pub bottom_right: Vec3,
}

/// Camera pose plus view-frame corners; everything the projector needs to
/// reconstruct a ray for every pixel. Derived once per pass, never mutated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraFrustum {
    pub position: Vec3,
    pub rotation: Quat,
    pub frame: ViewFrame,
}

impl CameraFrustum {
    pub fn new(position: Vec3, rotation: Quat, frame: ViewFrame) -> Self {
        Self {
            position,
            rotation,
            frame,
        }
    }

    /// Builds the view frame from a symmetric perspective lens: vertical
    /// field of view in radians and width/height aspect ratio, corners placed
    /// at unit distance along the camera's local -Z.
    pub fn from_fov(position: Vec3, rotation: Quat, fov_y: f32, aspect: f32) -> Self {
        let half_h = (fov_y * 0.5).tan();
        let half_w = half_h * aspect;
        let corner = |x: f32, y: f32| position + rotation * Vec3::new(x, y, -1.0);
        Self {
            position,
            rotation,
            frame: ViewFrame {
                top_left: corner(-half_w, half_h),
                top_right: corner(half_w, half_h),
                bottom_left: corner(-half_w, -half_h),
                bottom_right: corner(half_w, -half_h),
            },
        }
    }

    /// Unit view direction; the camera looks along its local -Z axis.
    pub fn forward(&self) -> Vec3 {
        (self.rotation * Vec3::NEG_Z).normalize()
    }

    /// Derives the per-pixel ray interpolation table for a `width`x`height`
    /// capture. Pixel row 0 sits at the bottom of the frame.
    pub fn pixel_rays(&self, width: u32, height: u32) -> PixelRays {
        let f = &self.frame;
        PixelRays {
            origin: self.position,
            base: f.bottom_left - self.position,
            step_x: (f.top_right - f.top_left) / width as f32,
            step_y: (f.top_right - f.bottom_right) / height as f32,
            forward: self.forward(),
        }
    }
}

/// Interpolated ray table: `base + step_x * x + step_y * y` points through
/// the view frame at fractional pixel coordinates (x, y), pixel centers at
/// half offsets.
#[derive(Clone, Copy, Debug)]
pub struct PixelRays {
    origin: Vec3,
    base: Vec3,
    step_x: Vec3,
    step_y: Vec3,
    forward: Vec3,
}

impl PixelRays {
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Ray direction (not normalized) through fractional pixel (x, y).
    pub fn ray_through(&self, x: f32, y: f32) -> Vec3 {
        self.base + self.step_x * x + self.step_y * y
    }
}
