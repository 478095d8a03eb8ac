//! Immutable 3D vector.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point or direction in 3D space.
///
/// Every operation returns a new value; equality is exact coordinate
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroLengthVector`] when the length is zero. Callers are
    /// expected to never normalize a coincident pair of points.
    pub fn normalize(self) -> Result<Self> {
        let len = self.length();
        if len > 0.0 {
            Ok(self.scale(1.0 / len))
        } else {
            Err(Error::ZeroLengthVector)
        }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Mirror across the XZ plane.
    pub fn reflect_y(self) -> Self {
        Self::new(self.x, -self.y, self.z)
    }

    /// Rotates about an axis through the origin by `angle` radians
    /// (right-hand rule), using the Rodrigues formula.
    ///
    /// The axis is normalized internally, so it only has to be non-zero.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroLengthVector`] when `axis` is zero.
    pub fn rotate_around_axis(self, axis: Self, angle: f64) -> Result<Self> {
        let k = axis.normalize()?;
        let (sin, cos) = angle.sin_cos();
        Ok(self.scale(cos) + k.cross(self).scale(sin) + k.scale(k.dot(self) * (1.0 - cos)))
    }

    /// Rotates about an axis passing through `pivot`.
    pub fn rotate_about_point(self, pivot: Self, axis: Self, angle: f64) -> Result<Self> {
        Ok((self - pivot).rotate_around_axis(axis, angle)? + pivot)
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self.scale(1.0 - t) + other.scale(t)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}
