use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::constants::N_AXES;

/// Accelerometer axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; N_AXES] = [Axis::X, Axis::Y, Axis::Z];
}

impl From<Axis> for usize {
    fn from(value: Axis) -> Self {
        value as usize
    }
}

/// Triaxial accelerometer reading. Components are integer sensor units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Sample {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> [i32; N_AXES] {
        [self.x, self.y, self.z]
    }

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Divides every component by `divisor`, rounding toward negative infinity.
    /// `divisor` must be positive.
    pub fn scaled(&self, divisor: i32) -> Self {
        Self {
            x: self.x.div_euclid(divisor),
            y: self.y.div_euclid(divisor),
            z: self.z.div_euclid(divisor),
        }
    }
}

impl From<[i32; N_AXES]> for Sample {
    fn from(value: [i32; N_AXES]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Sample> for [i32; N_AXES] {
    fn from(value: Sample) -> Self {
        value.inner()
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = &'static str;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        if value.len() != N_AXES {
            return Err("Can't convert to Sample");
        }
        if value
            .iter()
            .any(|v| v.fract() != 0.0 || *v < i32::MIN as f64 || *v > i32::MAX as f64)
        {
            return Err("Sample components must be integers");
        }
        Ok(Self::new(value[0] as i32, value[1] as i32, value[2] as i32))
    }
}

impl Add for Sample {
    type Output = Self;

    /// Saturates at the `i32` bounds.
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.x.saturating_add(rhs.x),
            self.y.saturating_add(rhs.y),
            self.z.saturating_add(rhs.z),
        )
    }
}

impl Sub for Sample {
    type Output = Self;

    /// Saturates at the `i32` bounds.
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(
            self.x.saturating_sub(rhs.x),
            self.y.saturating_sub(rhs.y),
            self.z.saturating_sub(rhs.z),
        )
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}
