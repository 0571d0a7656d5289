use glam::Vec3;

use crate::frustum::PixelRays;

/// A ray closer to the plane than this (by dot product with the normal) is
/// treated as parallel.
const PARALLEL_EPS: f32 = 1e-6;

/// World-space placement of one pixel's quad at the pixel's own depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelFootprint {
    pub position: Vec3,
    /// Half the distance to the horizontally adjacent pixel's intersection
    /// with the same plane; always > 0.
    pub half_size: f32,
}

/// Intersection of the infinite line through `a` and `b` with the plane
/// through `plane_point` with normal `plane_normal`; `None` when the line is
/// parallel to the plane.
pub fn intersect_line_plane(
    a: Vec3,
    b: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let dir = b - a;
    let denom = dir.dot(plane_normal);
    if denom.abs() < PARALLEL_EPS {
        return None;
    }
    let t = (plane_point - a).dot(plane_normal) / denom;
    Some(a + dir * t)
}

/// Projects pixel (x, y) at depth `depth` onto the plane perpendicular to the
/// camera's forward axis at that depth, returning the quad center and half
/// footprint size. `None` for degenerate rays or a zero-size footprint (for
/// example depth 0, where the plane passes through the camera).
pub fn project_pixel(rays: &PixelRays, x: u32, y: u32, depth: f32) -> Option<PixelFootprint> {
    let v_center = rays.ray_through(x as f32 + 0.5, y as f32 + 0.5);
    let v_next = rays.ray_through(x as f32 + 1.5, y as f32 + 0.5);

    let origin = rays.origin();
    let forward = rays.forward();
    let plane_point = origin + forward * depth;
    let plane_normal = -forward;

    let position = intersect_line_plane(origin, origin + v_center, plane_point, plane_normal)?;
    let next = intersect_line_plane(origin, origin + v_next, plane_point, plane_normal)?;

    let half_size = position.distance(next) / 2.0;
    if !half_size.is_finite() || half_size <= 0.0 {
        return None;
    }
    Some(PixelFootprint {
        position,
        half_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frustum::CameraFrustum;
    use glam::Quat;

    fn unit_camera(width: u32, height: u32) -> PixelRays {
        CameraFrustum::from_fov(
            Vec3::ZERO,
            Quat::IDENTITY,
            std::f32::consts::FRAC_PI_2,
            width as f32 / height as f32,
        )
        .pixel_rays(width, height)
    }

    #[test]
    fn line_plane_intersection_hits_expected_point() {
        let p = intersect_line_plane(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::Z,
        )
        .unwrap();
        assert!((p - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-6);
    }

    #[test]
    fn parallel_line_yields_none() {
        let p = intersect_line_plane(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::Z,
        );
        assert!(p.is_none());
    }

    #[test]
    fn footprint_lies_on_the_depth_plane() {
        let rays = unit_camera(4, 4);
        let fp = project_pixel(&rays, 1, 2, 7.0).unwrap();
        // plane is z = -7 for an identity camera at the origin
        assert!((fp.position.z + 7.0).abs() < 1e-4);
        assert!(fp.half_size > 0.0);
    }

    #[test]
    fn closer_pixels_get_smaller_footprints() {
        let rays = unit_camera(8, 8);
        let near = project_pixel(&rays, 3, 3, 1.0).unwrap();
        let far = project_pixel(&rays, 3, 3, 10.0).unwrap();
        assert!(near.half_size < far.half_size);
        // footprint grows linearly with depth under perspective
        assert!((far.half_size / near.half_size - 10.0).abs() < 1e-3);
    }

    #[test]
    fn zero_depth_is_degenerate() {
        let rays = unit_camera(4, 4);
        assert!(project_pixel(&rays, 0, 0, 0.0).is_none());
    }
}
