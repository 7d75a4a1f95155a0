//! Grid domain: the (up, forward) basis the player rolls with.

use bevy::prelude::*;

/// Tolerance used when validating an incoming basis.
const BASIS_EPSILON: f32 = 1e-3;

/// Tolerance for "forward is parallel to the new gravity face" after a warp.
const PARALLEL_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub enum OrientationError {
    /// An axis was zero, NaN or infinite.
    Degenerate { axis: &'static str, value: Vec3 },
    /// `up` and `forward` are not perpendicular.
    NotOrthogonal { up: Vec3, forward: Vec3 },
}

impl std::fmt::Display for OrientationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrientationError::Degenerate { axis, value } => {
                write!(f, "{} axis {:?} cannot be normalized", axis, value)
            }
            OrientationError::NotOrthogonal { up, forward } => {
                write!(f, "up {:?} and forward {:?} are not orthogonal", up, forward)
            }
        }
    }
}

/// Camera-driven turn of the rolling direction about `up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
    Back,
}

impl Turn {
    /// Signed angle in degrees, right-handed about `up`.
    pub fn degrees(self) -> f32 {
        match self {
            Turn::Left => 90.0,
            Turn::Right => -90.0,
            Turn::Back => 180.0,
        }
    }
}

/// Current gravity-opposed axis and rolling axis of the player.
///
/// Both vectors are unit length and perpendicular. Every constructor and
/// every transform below keeps that true, so callers never re-normalize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    up: Vec3,
    forward: Vec3,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            up: Vec3::Y,
            forward: Vec3::X,
        }
    }
}

impl Orientation {
    pub fn new(up: Vec3, forward: Vec3) -> Result<Self, OrientationError> {
        let up = up.try_normalize().ok_or(OrientationError::Degenerate {
            axis: "up",
            value: up,
        })?;
        let forward = forward
            .try_normalize()
            .ok_or(OrientationError::Degenerate {
                axis: "forward",
                value: forward,
            })?;

        if up.dot(forward).abs() > BASIS_EPSILON {
            return Err(OrientationError::NotOrthogonal { up, forward });
        }

        Ok(Self { up, forward })
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Sideways axis. With `up = +Y` and `forward = +X` this is `-Z`.
    pub fn left(&self) -> Vec3 {
        self.up.cross(self.forward)
    }

    pub fn is_valid(&self) -> bool {
        (self.up.length() - 1.0).abs() < BASIS_EPSILON
            && (self.forward.length() - 1.0).abs() < BASIS_EPSILON
            && self.up.dot(self.forward).abs() < BASIS_EPSILON
    }

    /// Basis after rolling down over the edge in front of the player.
    pub fn roll_over_edge(&self) -> Self {
        Self {
            up: self.forward,
            forward: -self.up,
        }
    }

    /// Basis after climbing onto the face of the block directly ahead.
    pub fn climb(&self) -> Self {
        Self {
            up: -self.forward,
            forward: self.up,
        }
    }

    /// Basis after a warp picked `face` (pointing from the player towards
    /// the supporting block) as the new floor.
    pub fn settle_on_face(&self, face: Vec3) -> Self {
        let face = face.normalize_or_zero();
        if face == Vec3::ZERO {
            return *self;
        }

        let forward = if (1.0 - self.forward.dot(face).abs()).abs() < PARALLEL_EPSILON {
            self.up
        } else {
            self.forward
        };

        Self { up: -face, forward }
    }

    /// Forward rotated about `up`, snapped back onto the lattice axes.
    pub fn turned(&self, turn: Turn) -> Self {
        let rotation = Quat::from_axis_angle(self.up, turn.degrees().to_radians());
        Self {
            up: self.up,
            forward: round_axis(rotation * self.forward),
        }
        .snapped()
    }

    /// Replaces `forward`, keeping `up`. Used when the camera hands back a
    /// direction; rejected if it does not form a valid basis.
    pub fn with_forward(&self, forward: Vec3) -> Result<Self, OrientationError> {
        Self::new(self.up, forward)
    }

    /// Rounds both axes to the nearest lattice axis.
    pub fn snapped(&self) -> Self {
        let up = round_axis(self.up);
        let forward = round_axis(self.forward);
        match Self::new(up, forward) {
            Ok(snapped) => snapped,
            Err(_) => *self,
        }
    }

    /// Rotation taking the world `Y` axis onto `up`.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_arc(Vec3::Y, self.up)
    }
}

fn round_axis(v: Vec3) -> Vec3 {
    let rounded = v.round();
    rounded.try_normalize().unwrap_or(v)
}
