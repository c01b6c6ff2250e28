#![allow(unused_macros)]

pub use cgmath::{*, num_traits::{one, zero}};

pub use std::f32::consts::PI;
pub const TAU: f32 = PI * 2.0;

#[macro_export]
macro_rules! vec4 {
    () => {
        Vec4 { x: zero(), y: zero(), z: zero(), w: zero() }
    };
    ($x: expr, $y: expr, $z: expr, $w: expr) => (
        Vec4 { x: $x, y: $y, z: $z, w: $w }
    );
    ($xyz: expr, $w: expr) => {
        vec4!($xyz.x, $xyz.y, $xyz.z, $w)
    };
}

#[macro_export]
macro_rules! vec3 {
    () => {
        Vec3 { x: zero(), y: zero(), z: zero() }
    };
    ($xyz: expr) => {
        vec3!($xyz.x, $xyz.y, $xyz.z)
    };
    ($x: expr, $y: expr, $z: expr) => (
        Vec3 { x: $x, y: $y, z: $z }
    );
}

#[macro_export]
macro_rules! point3 {
    () => {
        Point3 { x: zero(), y: zero(), z: zero() }
    };
    ($xyz: expr) => {
        point3!($xyz.x, $xyz.y, $xyz.z)
    };
    ($x: expr, $y: expr, $z: expr) => (
        Point3 { x: $x, y: $y, z: $z }
    );
}

/// `0xRRGGBB_AA` to a linear RGBA vector.
#[macro_export]
macro_rules! color {
    ($hex: expr) => (
        Vec4 {
            x: (($hex as u32 >> 0x18) & 0xFF) as Real / 255.0,
            y: (($hex as u32 >> 0x10) & 0xFF) as Real / 255.0,
            z: (($hex as u32 >> 0x08) & 0xFF) as Real / 255.0,
            w: (($hex as u32 >> 0x00) & 0xFF) as Real / 255.0,
        }
    );
}

pub type Real = f32;

pub type Vec4          = cgmath::Vector4<Real>;
pub const VEC4_W: Vec4 = vec4!(0.0, 0.0, 0.0, 1.0);

pub type Vec3          = cgmath::Vector3<Real>;
pub const VEC3_X: Vec3 = vec3!(1.0, 0.0, 0.0);
pub const VEC3_Y: Vec3 = vec3!(0.0, 1.0, 0.0);
pub const VEC3_Z: Vec3 = vec3!(0.0, 0.0, 1.0);
pub const VEC3_0: Vec3 = vec3!(0.0, 0.0, 0.0);

pub type Point3 = cgmath::Point3<Real>;
pub type Mat4   = cgmath::Matrix4<Real>;

/// Rotation taking `from` onto `to`; both must be unit length.
/// Antiparallel inputs rotate half a turn about any axis perpendicular to `from`.
pub fn rotation_between(from: Vec3, to: Vec3) -> Mat4 {
    let axis = from.cross(to);
    let sin  = axis.magnitude();
    let cos  = from.dot(to);
    if sin > 1.0e-6 {
        Mat4::from_axis_angle(axis / sin, Rad(sin.atan2(cos)))
    } else if cos > 0.0 {
        Mat4::identity()
    } else {
        let fallback = if from.x.abs() < 0.9 { VEC3_X } else { VEC3_Y };
        Mat4::from_axis_angle(from.cross(fallback).normalize(), Rad(PI))
    }
}

#[inline]
pub fn approx_eq(a: Real, b: Real, epsilon: Real) -> bool {
    (a - b).abs() <= epsilon
}
