//! Perspective camera and picking rays.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_HOME, CAMERA_LOOK_AT, CAMERA_NEAR};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
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
    pub fn hero(aspect: f32) -> Self {
        Self {
            eye: CAMERA_HOME,
            target: CAMERA_LOOK_AT,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Hit point with the horizontal plane `y = plane_y`, in front of the origin.
    #[inline]
    pub fn intersect_plane_y(&self, plane_y: f32) -> Option<Vec3> {
        if self.dir.y.abs() <= 1e-6 {
            return None;
        }
        let t = (plane_y - self.origin.y) / self.dir.y;
        (t >= 0.0).then(|| self.at(t))
    }
}

/// Convert a client-space pointer position into normalized device coordinates.
#[inline]
pub fn pointer_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / width) * 2.0 - 1.0,
        -(client_y / height) * 2.0 + 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_ray_points_at_target() {
        let cam = Camera::hero(16.0 / 9.0);
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (cam.target - cam.eye).normalize();
        assert!(ray.dir.abs_diff_eq(expected, 1e-4), "{:?}", ray.dir);
    }

    #[test]
    fn plane_behind_ray_is_missed() {
        let ray = Ray {
            origin: Vec3::new(0.0, 5.0, 0.0),
            dir: Vec3::Y,
        };
        assert_eq!(ray.intersect_plane_y(-2.0), None);
        let parallel = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::X,
        };
        assert_eq!(parallel.intersect_plane_y(-2.0), None);
    }

    #[test]
    fn pointer_corners_map_to_ndc_corners() {
        assert_eq!(pointer_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(pointer_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(pointer_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    }
}
