use super::*;

/// Where every light sits at angle zero, before its slot rotation.
pub const LIGHT_INITIAL_POSITION: Vec4 = vec4!(3.0, 3.0, 0.0, 1.0);

/// Cutoff reported for lights that are not spots; lights the full sphere.
pub const UNIFORM_CUTOFF: Real = 180.0;

#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct Attenuation {
    pub constant:  Real,
    pub linear:    Real,
    pub quadratic: Real,
}

impl Attenuation {
    pub const NONE:  Attenuation = Attenuation { constant: 1.0, linear: 0.0, quadratic: 0.0 };
    pub const POINT: Attenuation = Attenuation { constant: 1.0, linear: 0.1, quadratic: 0.05 };

    #[inline]
    pub fn factor(&self, distance: Real) -> Real {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightParams {
    pub kind: LightKind,
    pub on:   bool,

    /// Homogeneous; `w == 0` for the directional light.
    pub position:    Vec4,
    pub attenuation: Attenuation,

    /// Only meaningful when `spot_cutoff < UNIFORM_CUTOFF`.
    pub spot_direction: Vec3,
    /// Half-angle in degrees.
    pub spot_cutoff:    Real,
    pub spot_exponent:  Real,
}

impl LightParams {
    pub fn derive(kind: LightKind, animation: &Animation) -> Self {
        let rotation = Mat4::from_angle_y(Deg(animation.light_angle(kind)));
        let mut position = rotation * LIGHT_INITIAL_POSITION;
        if kind == LightKind::Directional {
            position.w = 0.0;
        }

        let attenuation = match kind {
            LightKind::Point => Attenuation::POINT,
            _                => Attenuation::NONE,
        };

        let (spot_direction, spot_cutoff, spot_exponent) = match kind {
            LightKind::Spot => (-position.truncate(), animation.cutoff(), animation.exponent()),
            _               => (VEC3_0, UNIFORM_CUTOFF, 0.0),
        };

        LightParams {
            kind,
            on: animation.is_light_on(kind),
            position,
            attenuation,
            spot_direction,
            spot_cutoff,
            spot_exponent,
        }
    }

    #[inline]
    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }

    /// The position as a point, ignoring `w`.
    #[inline]
    pub fn location(&self) -> Point3 {
        Point3::from_vec(self.position.truncate())
    }

    /// Cosine of the cutoff; `-2` marks a light with no cone at all.
    #[inline]
    pub fn spot_cos_cutoff(&self) -> Real {
        if self.spot_cutoff >= UNIFORM_CUTOFF {
            -2.0
        } else {
            self.spot_cutoff.to_radians().cos()
        }
    }
}

/// Every light slot as the renderer should see it this frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightRig {
    lights: [LightParams; 3],
}

impl LightRig {
    pub fn derive(animation: &Animation) -> Self {
        LightRig {
            lights: [
                LightParams::derive(LightKind::Point,       animation),
                LightParams::derive(LightKind::Directional, animation),
                LightParams::derive(LightKind::Spot,        animation),
            ],
        }
    }

    #[inline]
    pub fn get(&self, kind: LightKind) -> &LightParams {
        &self.lights[kind.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightParams> {
        self.lights.iter()
    }

    pub fn lit(&self) -> impl Iterator<Item = &LightParams> {
        self.lights.iter().filter(|light| light.on)
    }

    pub fn any_on(&self) -> bool {
        self.lights.iter().any(|light| light.on)
    }
}
