use super::*;

pub const AXIS_LENGTH: Real = 3.0;
pub const NORMAL_LENGTH: Real = 0.2;

const GIZMO_SEGMENTS: usize = 16;

const TAIL_RADIUS:      Real = 0.05;
const SHAFT_LENGTH:     Real = 0.2;
const ARROWHEAD_HEIGHT: Real = 0.09;
const ARROWHEAD_RADIUS: Real = 0.06;
const SPOT_CONE_HEIGHT: Real = 0.15;
const SPOT_APEX_RADIUS: Real = 0.06;
// tan() blows up at a 90 degree cutoff
const SPOT_DRAWN_CUTOFF_MAX: Real = 80.0;

pub const BLACK: Vec4 = color!(0x000000_FF);
pub const RED:   Vec4 = color!(0xFF0000_FF);
pub const GREEN: Vec4 = color!(0x00FF00_FF);
pub const BLUE:  Vec4 = color!(0x0000FF_FF);
pub const GRAY:  Vec4 = color!(0x666666_FF);

#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct LineVertex {
    pub position: Point3,
    pub color:    Vec4,
}

/// A line list rebuilt every frame and streamed to the GPU in one draw.
#[derive(Clone, Debug, Default)]
pub struct LineBatch {
    vertices: Vec<LineVertex>,
}

impl LineBatch {
    pub fn new() -> Self {
        LineBatch::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.vertices.len() / 2
    }

    #[inline]
    pub fn push_line(&mut self, from: Point3, to: Point3, color: Vec4) {
        self.vertices.push(LineVertex { position: from, color });
        self.vertices.push(LineVertex { position: to,   color });
    }

    pub fn push_axes(&mut self, length: Real) {
        let origin = point3!();
        self.push_line(origin, origin + length * VEC3_X, RED);
        self.push_line(origin, origin + length * VEC3_Y, GREEN);
        self.push_line(origin, origin + length * VEC3_Z, BLUE);
    }

    /// Three axis-aligned strokes crossing at `center`, each `2 * radius` long.
    pub fn push_marker(&mut self, center: Point3, radius: Real, color: Vec4) {
        for &axis in &[VEC3_X, VEC3_Y, VEC3_Z] {
            self.push_line(center - radius * axis, center + radius * axis, color);
        }
    }

    /// Cone opening from `apex` along the unit `direction`: a ring at the base plus
    /// slanted edges back to the apex.
    pub fn push_cone(&mut self,
        apex:      Point3,
        direction: Vec3,
        height:    Real,
        radius:    Real,
        color:     Vec4,
        segments:  usize,
    ) {
        let orient = rotation_between(VEC3_Z, direction);
        let base   = apex + height * direction;
        let ring   = |k: usize| {
            let angle  = TAU * k as Real / segments as Real;
            let offset = orient.transform_vector(vec3!(angle.cos(), angle.sin(), 0.0));
            base + radius * offset
        };

        for k in 0..segments {
            let (this, next) = (ring(k), ring(k + 1));
            self.push_line(this, next, color);
            if k % 4 == 0 {
                self.push_line(apex, this, color);
            }
        }
    }

    /// Marker at `tail`, a shaft along `direction`, and a head whose tip points away
    /// from the tail.
    pub fn push_arrow(&mut self, tail: Point3, direction: Vec3) {
        let shaft_end = tail + SHAFT_LENGTH * direction;
        let tip       = shaft_end + ARROWHEAD_HEIGHT * direction;

        self.push_marker(tail, TAIL_RADIUS, RED);
        self.push_line(tail, shaft_end, GREEN);
        self.push_cone(tip, -direction, ARROWHEAD_HEIGHT, ARROWHEAD_RADIUS, BLUE, GIZMO_SEGMENTS);
    }

    pub fn push_light_gizmo(&mut self, light: &LightParams) {
        if !light.on { return; }

        let location = light.location();
        let toward_origin = -location.to_vec().normalize();
        match light.kind {
            LightKind::Point => {
                self.push_marker(location, TAIL_RADIUS, RED);
            },
            LightKind::Directional => {
                self.push_arrow(location, toward_origin);
            },
            LightKind::Spot => {
                let cutoff = light.spot_cutoff.min(SPOT_DRAWN_CUTOFF_MAX);
                let radius = SPOT_CONE_HEIGHT * cutoff.to_radians().tan();
                self.push_cone(
                    location, light.spot_direction.normalize(),
                    SPOT_CONE_HEIGHT, radius, BLACK, GIZMO_SEGMENTS,
                );
                let apex_radius = SPOT_APEX_RADIUS * (0.5 + light.spot_exponent / EXPONENT_MAX);
                self.push_marker(location, apex_radius, GRAY);
            },
        }
    }

    pub fn push_normals(&mut self, mesh: &TorusMesh, length: Real) {
        for segment in mesh.normal_segments(length).chunks(2) {
            self.push_line(segment[0], segment[1], BLACK);
        }
    }
}

#[derive(Debug)]
pub struct LineRender {
    program: GLuint,

    vao: GLuint,
    vbo: GLuint,
}

impl LineRender {
    pub fn init() -> Result<Self, GlslError> {
        let program = gl::build_program(
            include_bytes!("shader/line.vert.glsl"),
            include_bytes!("shader/line.frag.glsl"),
        )?;
        gl::bind_uniform_block(program, "Camera", CAMERA_BINDING_INDEX)?;
        let a_position = gl::get_attrib_location(program, "a_position")?;
        let a_color    = gl::get_attrib_location(program, "a_color")?;

        unsafe {
            let vao = gl::gen_object(gl::GenVertexArrays);
            gl::BindVertexArray(vao);

            let vbo = gl::gen_object(gl::GenBuffers);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            let stride = mem::size_of::<LineVertex>();
            gl::float_attrib(a_position, 3, stride, 0);
            gl::float_attrib(a_color,    4, stride, mem::size_of::<Point3>());

            gl::BindVertexArray(0);
            Ok(LineRender { program, vao, vbo })
        }
    }

    pub fn draw(&mut self, batch: &LineBatch) {
        if batch.vertices().is_empty() { return; }
        unsafe {
            gl::UseProgram(self.program);

            gl::BindVertexArray(self.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
            gl::buffer_data(gl::ARRAY_BUFFER, batch.vertices(), gl::STREAM_DRAW);
            gl::DrawArrays(gl::LINES, 0, batch.vertices().len() as GLsizei);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for LineRender {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteProgram(self.program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::torus::{LATITUDE_STEPS, LONGITUDE_STEPS};

    const EPSILON: Real = 1e-4;

    fn lit_rig() -> LightRig {
        let mut animation = Animation::new(AnimationSettings::default());
        for &kind in LightKind::ALL.iter() {
            animation.toggle_light(kind);
        }
        LightRig::derive(&animation)
    }

    #[test]
    fn axes_are_colored_per_axis() {
        let mut batch = LineBatch::new();
        batch.push_axes(AXIS_LENGTH);

        let vertices = batch.vertices();
        assert_eq!(batch.line_count(), 3);
        assert_eq!(vertices[1].position, point3!(3.0, 0.0, 0.0));
        assert_eq!(vertices[1].color, RED);
        assert_eq!(vertices[3].position, point3!(0.0, 3.0, 0.0));
        assert_eq!(vertices[5].color, BLUE);
    }

    #[test]
    fn cone_ring_sits_at_the_cutoff_angle() {
        let mut batch = LineBatch::new();
        let apex      = point3!(1.0, 2.0, 3.0);
        let direction = vec3!(0.0, -1.0, 0.0);
        let (height, radius) = (0.5, 0.25);
        batch.push_cone(apex, direction, height, radius, BLACK, 8);

        let base = apex + height * direction;
        for vertex in batch.vertices() {
            let offset = vertex.position - apex;
            if offset.magnitude() < EPSILON { continue; }
            // every non-apex point is on the base ring
            assert!(approx_eq((vertex.position - base).magnitude(), radius, EPSILON));
            assert!(approx_eq(offset.dot(direction), height, EPSILON));
        }
    }

    #[test]
    fn arrow_tip_points_at_the_origin() {
        let mut batch = LineBatch::new();
        let tail = point3!(3.0, 3.0, 0.0);
        batch.push_arrow(tail, -tail.to_vec().normalize());

        let farthest = batch.vertices().iter()
            .map(|vertex| (vertex.position - tail).magnitude())
            .fold(0.0, Real::max);
        assert!(approx_eq(farthest, SHAFT_LENGTH + ARROWHEAD_HEIGHT, EPSILON));
    }

    #[test]
    fn gizmos_only_for_lit_lights() {
        let mut batch = LineBatch::new();
        let dark = LightRig::derive(&Animation::new(AnimationSettings::default()));
        for light in dark.iter() {
            batch.push_light_gizmo(light);
        }
        assert_eq!(batch.line_count(), 0);

        let rig = lit_rig();
        batch.push_light_gizmo(rig.get(LightKind::Point));
        assert_eq!(batch.line_count(), 3);
        for vertex in batch.vertices() {
            assert!((vertex.position - point3!(3.0, 3.0, 0.0)).magnitude() <= TAIL_RADIUS + EPSILON);
        }
    }

    #[test]
    fn spot_gizmo_widens_with_the_cutoff() {
        let rig   = lit_rig();
        let spot  = rig.get(LightKind::Spot);
        let mut batch = LineBatch::new();
        batch.push_light_gizmo(spot);

        let apex   = spot.location();
        let radius = SPOT_CONE_HEIGHT * 30.0_f32.to_radians().tan();
        let widest = batch.vertices().iter()
            .map(|vertex| (vertex.position - apex).magnitude())
            .fold(0.0, Real::max);
        let slant  = (SPOT_CONE_HEIGHT * SPOT_CONE_HEIGHT + radius * radius).sqrt();
        assert!(approx_eq(widest, slant, EPSILON));
    }

    #[test]
    fn spot_gizmo_stays_bounded_at_a_right_angle_cutoff() {
        let settings = AnimationSettings {
            cutoff_max:     90.0,
            cutoff_initial: 90.0,
            ..AnimationSettings::default()
        };
        let mut animation = Animation::new(settings);
        animation.toggle_light(LightKind::Spot);
        let spot = *LightRig::derive(&animation).get(LightKind::Spot);
        assert_eq!(spot.spot_cutoff, 90.0);

        let mut batch = LineBatch::new();
        batch.push_light_gizmo(&spot);

        let apex   = spot.location();
        let radius = SPOT_CONE_HEIGHT * SPOT_DRAWN_CUTOFF_MAX.to_radians().tan();
        let limit  = (SPOT_CONE_HEIGHT * SPOT_CONE_HEIGHT + radius * radius).sqrt();
        for vertex in batch.vertices() {
            let reach = (vertex.position - apex).magnitude();
            assert!(reach.is_finite() && reach <= limit + EPSILON, "gizmo reaches {}", reach);
        }
    }

    #[test]
    fn one_segment_per_quad_normal() {
        let mesh = make_torus_mesh();
        let mut batch = LineBatch::new();
        batch.push_normals(&mesh, NORMAL_LENGTH);
        assert_eq!(batch.line_count(), LONGITUDE_STEPS * LATITUDE_STEPS);

        let first = &batch.vertices()[0..2];
        assert!(approx_eq((first[1].position - first[0].position).magnitude(), NORMAL_LENGTH, EPSILON));
    }
}
