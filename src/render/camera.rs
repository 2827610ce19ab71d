//! Rotating perspective camera shared by the phase-volume and fluid-mesh
//! projections.

use super::Viewport;

/// Distance from the eye to the origin, in model units. Model coordinates
/// live in roughly [-1, 1] on each axis.
const EYE_DISTANCE: f32 = 3.0;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
}

impl Camera {
    pub fn new(yaw: f32, pitch: f32, zoom: f32) -> Self {
        Self { yaw, pitch, zoom }
    }

    /// Rotate a model-space point by yaw (about Y) then pitch (about X) and
    /// perspective-project it onto the viewport. Returns the screen position
    /// and the post-rotation depth (larger = farther from the eye).
    pub fn project(&self, point: [f32; 3], viewport: Viewport) -> ((f32, f32), f32) {
        let [x, y, z] = point;

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let xr = x * cos_yaw - z * sin_yaw;
        let zr = x * sin_yaw + z * cos_yaw;

        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let yr = y * cos_pitch - zr * sin_pitch;
        let depth = y * sin_pitch + zr * cos_pitch;

        // Keep the divisor positive even for points swung behind the eye.
        let persp = EYE_DISTANCE / (EYE_DISTANCE + depth).max(0.2);
        let radius = viewport.width.min(viewport.height) as f32 * 0.5;
        let cx = viewport.width as f32 * 0.5;
        let cy = viewport.height as f32 * 0.5;

        let sx = cx + xr * persp * radius * self.zoom;
        let sy = cy - yr * persp * radius * self.zoom;
        ((sx, sy), depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 100,
        height: 100,
    };

    #[test]
    fn origin_projects_to_center() {
        let cam = Camera::new(1.2, 0.7, 1.0);
        let ((x, y), _) = cam.project([0.0, 0.0, 0.0], VIEW);
        assert!((x - 50.0).abs() < 1e-4);
        assert!((y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn nearer_points_project_larger() {
        let cam = Camera::new(0.0, 0.0, 1.0);
        let ((near_x, _), near_d) = cam.project([1.0, 0.0, -0.5], VIEW);
        let ((far_x, _), far_d) = cam.project([1.0, 0.0, 0.5], VIEW);
        assert!(near_d < far_d);
        assert!(
            (near_x - 50.0).abs() > (far_x - 50.0).abs(),
            "perspective must enlarge nearer points"
        );
    }

    #[test]
    fn yaw_swings_points_around_the_vertical_axis() {
        let cam0 = Camera::new(0.0, 0.0, 1.0);
        let cam_half = Camera::new(std::f32::consts::PI, 0.0, 1.0);
        let ((x0, _), _) = cam0.project([1.0, 0.0, 0.0], VIEW);
        let ((x1, _), _) = cam_half.project([1.0, 0.0, 0.0], VIEW);
        assert!((x0 - 50.0) > 0.0);
        assert!((x1 - 50.0) < 0.0, "half a turn must mirror X");
    }
}
