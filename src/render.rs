use super::*;

pub const CAMERA_BINDING_INDEX: GLuint = 1;

pub const ELEMENT_INDEX_TYPE: GLenum = gl::UNSIGNED_SHORT;

pub const BACKGROUND_COLOR: Vec4 = color!(0xFFFFFF_FF);
pub const TORUS_COLOR:      Vec4 = vec4!(0.4, 0.4, 0.4, 1.0);
pub const WIRE_COLOR:       Vec4 = color!(0x000000_FF);

pub const EYE:    Point3 = point3!(3.0, 5.5, 6.0);
pub const CENTER: Point3 = point3!(0.0, 0.0, 0.0);
pub const FOVY:   Deg<Real> = Deg(30.0);
pub const NEAR:   Real = 0.1;
pub const FAR:    Real = 100.0;

/// Laid out as the `Camera` uniform block (std140).
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct Camera {
    pub view:       Mat4,
    pub projection: Mat4,

    pub position: Point3,
    _padding:     Real,
}

impl Camera {
    pub fn look_at(eye: Point3, center: Point3, aspect: Real) -> Self {
        Camera {
            view:       Mat4::look_at(eye, center, VEC3_Y),
            projection: perspective(FOVY, aspect, NEAR, FAR),

            position: eye,
            _padding: 0.0,
        }
    }

    #[inline]
    pub fn set_aspect(&mut self, aspect: Real) {
        self.projection = perspective(FOVY, aspect, NEAR, FAR);
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::look_at(EYE, CENTER, 4.0 / 3.0)
    }
}

pub struct Render {
    program: GLuint,

    u_color:    GLint,
    u_lighting: GLint,
    u_shininess: GLint,

    u_light_on:              GLint,
    u_light_position:        GLint,
    u_light_attenuation:     GLint,
    u_light_spot_direction:  GLint,
    u_light_spot_cos_cutoff: GLint,
    u_light_spot_exponent:   GLint,

    ubo_camera: GLuint,

    vao: GLuint,
    vbo_position: GLuint,
    vbo_normal:   GLuint,

    ebo_triangles:     GLuint,
    ebo_triangles_len: usize,
    ebo_edges:         GLuint,
    ebo_edges_len:     usize,

    lighting: bool,
}

impl Render {
    pub fn init(mesh: &TorusMesh) -> Result<Self, GlslError> {
        let program = gl::build_program(
            include_bytes!("shader/torus.vert.glsl"),
            include_bytes!("shader/torus.frag.glsl"),
        )?;
        gl::bind_uniform_block(program, "Camera", CAMERA_BINDING_INDEX)?;

        let u_color     = gl::get_uniform_location(program, "u_color")?;
        let u_lighting  = gl::get_uniform_location(program, "u_lighting")?;
        let u_shininess = gl::get_uniform_location(program, "u_shininess")?;

        let u_light_on              = gl::get_uniform_location(program, "u_light_on")?;
        let u_light_position        = gl::get_uniform_location(program, "u_light_position")?;
        let u_light_attenuation     = gl::get_uniform_location(program, "u_light_attenuation")?;
        let u_light_spot_direction  = gl::get_uniform_location(program, "u_light_spot_direction")?;
        let u_light_spot_cos_cutoff = gl::get_uniform_location(program, "u_light_spot_cos_cutoff")?;
        let u_light_spot_exponent   = gl::get_uniform_location(program, "u_light_spot_exponent")?;

        let a_position = gl::get_attrib_location(program, "a_position")?;
        let a_normal   = gl::get_attrib_location(program, "a_normal")?;

        let triangles = mesh.triangle_indices();
        let edges     = mesh.edge_indices();

        unsafe {
            let ubo_camera = gl::gen_object(gl::GenBuffers);
            gl::BindBuffer(gl::UNIFORM_BUFFER, ubo_camera);
            gl::buffer_init::<Camera>(gl::UNIFORM_BUFFER, 1, gl::DYNAMIC_DRAW);
            gl::BindBufferBase(gl::UNIFORM_BUFFER, CAMERA_BINDING_INDEX, ubo_camera);

            let vao = gl::gen_object(gl::GenVertexArrays);
            gl::BindVertexArray(vao);

            // PER-VERTEX ATTRIBUTES
            let vbo_position = gl::gen_object(gl::GenBuffers);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo_position);
            gl::buffer_data(gl::ARRAY_BUFFER, mesh.positions().as_slice(), gl::STATIC_DRAW);
            gl::float_attrib(a_position, 3, 0, 0);

            let vbo_normal = gl::gen_object(gl::GenBuffers);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo_normal);
            gl::buffer_data(gl::ARRAY_BUFFER, mesh.vertex_normals().as_slice(), gl::STATIC_DRAW);
            gl::float_attrib(a_normal, 3, 0, 0);

            gl::BindVertexArray(0);

            let ebo_triangles = gl::gen_object(gl::GenBuffers);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo_triangles);
            gl::buffer_data(gl::ELEMENT_ARRAY_BUFFER, &triangles, gl::STATIC_DRAW);

            let ebo_edges = gl::gen_object(gl::GenBuffers);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo_edges);
            gl::buffer_data(gl::ELEMENT_ARRAY_BUFFER, &edges, gl::STATIC_DRAW);

            debug!("torus uploaded: {} vertices, {} triangles, {} edges",
                mesh.positions().len(), triangles.len() / 3, edges.len() / 2);

            Ok(Render {
                program,
                u_color, u_lighting, u_shininess,
                u_light_on, u_light_position, u_light_attenuation,
                u_light_spot_direction, u_light_spot_cos_cutoff, u_light_spot_exponent,
                ubo_camera,
                vao, vbo_position, vbo_normal,
                ebo_triangles, ebo_triangles_len: triangles.len(),
                ebo_edges,     ebo_edges_len:     edges.len(),
                lighting: false,
            })
        }
    }

    #[inline]
    pub fn update_camera(&mut self, camera: &Camera) {
        unsafe {
            gl::BindBuffer(gl::UNIFORM_BUFFER, self.ubo_camera);
            gl::buffer_data(gl::UNIFORM_BUFFER, slice::from_ref(camera), gl::DYNAMIC_DRAW);
        }
    }

    pub fn update_lights(&mut self, rig: &LightRig, shininess: Real) {
        let mut on          = [0 as GLint; 3];
        let mut position    = [VEC4_W; 3];
        let mut attenuation = [Attenuation::NONE; 3];
        let mut direction   = [VEC3_0; 3];
        let mut cos_cutoff  = [0.0 as Real; 3];
        let mut exponent    = [0.0 as Real; 3];
        for light in rig.iter() {
            let slot = light.kind.slot();
            on[slot]          = light.on as GLint;
            position[slot]    = light.position;
            attenuation[slot] = light.attenuation;
            direction[slot]   = light.spot_direction;
            cos_cutoff[slot]  = light.spot_cos_cutoff();
            exponent[slot]    = light.spot_exponent;
        }
        self.lighting = rig.any_on();

        unsafe {
            gl::UseProgram(self.program);
            gl::Uniform1f(self.u_shininess, shininess);
            gl::Uniform1iv(self.u_light_on, 3, on.as_ptr());
            gl::Uniform4fv(self.u_light_position, 3, position.as_ptr() as *const GLfloat);
            gl::Uniform3fv(self.u_light_attenuation, 3, attenuation.as_ptr() as *const GLfloat);
            gl::Uniform3fv(self.u_light_spot_direction, 3, direction.as_ptr() as *const GLfloat);
            gl::Uniform1fv(self.u_light_spot_cos_cutoff, 3, cos_cutoff.as_ptr());
            gl::Uniform1fv(self.u_light_spot_exponent, 3, exponent.as_ptr());
        }
    }

    /// Lit gray fill pushed back by a polygon offset, then the unlit black wireframe.
    pub fn render_torus(&mut self) {
        unsafe {
            gl::UseProgram(self.program);
            gl::BindVertexArray(self.vao);

            gl::Enable(gl::POLYGON_OFFSET_FILL);
            gl::PolygonOffset(1.0, 1.0);
            gl::Uniform1i(self.u_lighting, self.lighting as GLint);
            gl::Uniform4fv(self.u_color, 1, TORUS_COLOR.as_ptr());
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.ebo_triangles);
            gl::DrawElements(
                gl::TRIANGLES,
                self.ebo_triangles_len as GLsizei,
                ELEMENT_INDEX_TYPE,
                ptr::null(),
            );
            gl::Disable(gl::POLYGON_OFFSET_FILL);

            gl::Uniform1i(self.u_lighting, 0);
            gl::Uniform4fv(self.u_color, 1, WIRE_COLOR.as_ptr());
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.ebo_edges);
            gl::DrawElements(
                gl::LINES,
                self.ebo_edges_len as GLsizei,
                ELEMENT_INDEX_TYPE,
                ptr::null(),
            );

            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Render {
    fn drop(&mut self) {
        unsafe {
            let buffers = [
                self.ubo_camera, self.vbo_position, self.vbo_normal,
                self.ebo_triangles, self.ebo_edges,
            ];
            gl::DeleteBuffers(buffers.len() as GLsizei, buffers.as_ptr());
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteProgram(self.program);
        }
    }
}
