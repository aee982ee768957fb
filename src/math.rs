//! Quaternion and matrix operations used by the keyframer that `glam` doesn't provide, or
//! provides with a different convention. Quaternions in a .3ds file are not always unit length,
//! so nothing here assumes they are.

use glam::{Mat4, Quat, Vec3, Vec4};

pub const EPSILON: f32 = 1e-5;

/// Rotation of `angle` radians around `axis`, with the sign convention of the .3ds keyframer.
/// A zero axis gives the identity.
pub fn quat_from_axis_angle(axis: Vec3, angle: f32) -> Quat {
    let l = f64::from(axis.length());
    if l < f64::from(EPSILON) {
        return Quat::IDENTITY;
    }
    let omega = -0.5 * f64::from(angle);
    let s = omega.sin() / l;
    Quat::from_xyzw(
        (s * f64::from(axis.x)) as f32,
        (s * f64::from(axis.y)) as f32,
        (s * f64::from(axis.z)) as f32,
        omega.cos() as f32,
    )
}

pub fn quat_ln(q: Quat) -> Quat {
    let s = (f64::from(q.x) * f64::from(q.x)
        + f64::from(q.y) * f64::from(q.y)
        + f64::from(q.z) * f64::from(q.z))
    .sqrt();
    let om = s.atan2(f64::from(q.w));
    let t = if s.abs() < f64::from(EPSILON) { 0.0 } else { om / s };
    Quat::from_xyzw(
        (f64::from(q.x) * t) as f32,
        (f64::from(q.y) * t) as f32,
        (f64::from(q.z) * t) as f32,
        0.0,
    )
}

/// `ln(a⁻¹ · b)`
pub fn quat_ln_dif(a: Quat, b: Quat) -> Quat {
    quat_ln(quat_inv(a) * b)
}

pub fn quat_exp(q: Quat) -> Quat {
    let om = (f64::from(q.x) * f64::from(q.x)
        + f64::from(q.y) * f64::from(q.y)
        + f64::from(q.z) * f64::from(q.z))
    .sqrt();
    let sinom = if om.abs() < f64::from(EPSILON) {
        1.0
    } else {
        om.sin() / om
    };
    Quat::from_xyzw(
        (f64::from(q.x) * sinom) as f32,
        (f64::from(q.y) * sinom) as f32,
        (f64::from(q.z) * sinom) as f32,
        om.cos() as f32,
    )
}

/// Conjugate scaled by the inverse length. Unlike `Quat::inverse` this doesn't require a unit
/// quaternion.
pub fn quat_inv(q: Quat) -> Quat {
    let l = f64::from(q.length());
    if l.abs() < f64::from(EPSILON) {
        return Quat::IDENTITY;
    }
    let m = 1.0 / l;
    Quat::from_xyzw(
        (-f64::from(q.x) * m) as f32,
        (-f64::from(q.y) * m) as f32,
        (-f64::from(q.z) * m) as f32,
        (f64::from(q.w) * m) as f32,
    )
}

/// Spherical interpolation along the shortest arc. Falls back to a linear blend when the
/// quaternions are almost parallel.
pub fn quat_slerp(a: Quat, b: Quat, t: f32) -> Quat {
    let mut l = f64::from(a.dot(b));
    let mut flip = 1.0f64;
    if l < 0.0 {
        flip = -1.0;
        l = -l;
    }

    let t = f64::from(t);
    let om = l.min(1.0).acos();
    let sinom = om.sin();
    let (sp, mut sq) = if sinom.abs() > f64::from(EPSILON) {
        (((1.0 - t) * om).sin() / sinom, (t * om).sin() / sinom)
    } else {
        (1.0 - t, t)
    };
    sq *= flip;

    let a = a.to_array();
    let b = b.to_array();
    let mut c = [0.0f32; 4];
    for i in 0..4 {
        c[i] = (sp * f64::from(a[i]) + sq * f64::from(b[i])) as f32;
    }
    Quat::from_array(c)
}

/// Spherical quadrangle interpolation between `a` and `b` with the inner control points `p`
/// and `q`.
pub fn quat_squad(a: Quat, p: Quat, q: Quat, b: Quat, t: f32) -> Quat {
    let ab = quat_slerp(a, b, t);
    let pq = quat_slerp(p, q, t);
    quat_slerp(ab, pq, 2.0 * t * (1.0 - t))
}

/// Rotation matrix of a quaternion of any non-zero length.
pub fn rotation_matrix(q: Quat) -> Mat4 {
    let l = q.length_squared();
    if l.abs() < EPSILON {
        return Mat4::IDENTITY;
    }
    Mat4::from_quat(q / l.sqrt())
}

/// Reads a matrix from the 4x3 layout of the format: four columns of three floats, the last
/// row is implied to be `(0, 0, 0, 1)`.
pub fn matrix_from_4x3(cols: [Vec3; 4]) -> Mat4 {
    Mat4::from_cols(
        cols[0].extend(0.0),
        cols[1].extend(0.0),
        cols[2].extend(0.0),
        Vec4::new(cols[3].x, cols[3].y, cols[3].z, 1.0),
    )
}

pub fn matrix_to_4x3(m: &Mat4) -> [Vec3; 4] {
    [
        m.x_axis.truncate(),
        m.y_axis.truncate(),
        m.z_axis.truncate(),
        m.w_axis.truncate(),
    ]
}

/// Unit length copy of `v`. A degenerate vector becomes the axis of its largest component.
pub fn vector_normalize(v: Vec3) -> Vec3 {
    let l = v.length();
    if l.abs() < EPSILON {
        if v.x >= v.y && v.x >= v.z {
            Vec3::X
        } else if v.y >= v.z {
            Vec3::Y
        } else {
            Vec3::Z
        }
    } else {
        v * (1.0 / l)
    }
}

/// Normal of the triangle `a, b, c`, counter-clockwise winding.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    vector_normalize((c - b).cross(a - b))
}

/// Componentwise min/max accumulation of a bounding box.
pub fn extend_bounds(bmin: &mut Vec3, bmax: &mut Vec3, p: Vec3) {
    *bmin = bmin.min(p);
    *bmax = bmax.max(p);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Quat, b: Quat) -> bool {
        (a.x - b.x).abs() < 1e-5
            && (a.y - b.y).abs() < 1e-5
            && (a.z - b.z).abs() < 1e-5
            && (a.w - b.w).abs() < 1e-5
    }

    #[test]
    fn test_axis_angle_sign() {
        let q = quat_from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2);
        let half = (std::f32::consts::FRAC_PI_4).sin();
        assert!(close(q, Quat::from_xyzw(0.0, 0.0, -half, half)));
        assert_eq!(quat_from_axis_angle(Vec3::ZERO, 1.0), Quat::IDENTITY);
    }

    #[test]
    fn test_ln_exp() {
        let q = quat_from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.7);
        assert!(close(quat_exp(quat_ln(q)), q));
        assert!(close(quat_ln(Quat::IDENTITY), Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = quat_from_axis_angle(Vec3::X, 0.2);
        let b = quat_from_axis_angle(Vec3::Y, 1.3);
        assert!(close(quat_slerp(a, b, 0.0), a));
        assert!(close(quat_slerp(a, b, 1.0), b));
        assert!(close(quat_squad(a, a, b, b, 1.0), b));
    }

    #[test]
    fn test_face_normal() {
        let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(n, Vec3::Z);
        assert_eq!(face_normal(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO), Vec3::X);
    }

    #[test]
    fn test_4x3_layout() {
        let cols = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
            Vec3::new(10.0, 11.0, 12.0),
        ];
        let m = matrix_from_4x3(cols);
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(10.0, 11.0, 12.0));
        assert_eq!(matrix_to_4x3(&m), cols);
    }
}
