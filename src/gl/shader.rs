use super::*;

use thiserror::Error;

/// A compile or link failure, carrying the driver's info log.
#[derive(Clone, Debug, Error)]
#[error("{description}")]
pub struct GlslError {
    description: String,
}

impl<T: Into<String>> From<T> for GlslError {
    fn from(t: T) -> Self {
        GlslError { description: t.into() }
    }
}

/// Compiles a vertex and a fragment shader and links them. On failure nothing is left behind.
pub fn build_program(vertex_src: &[u8], fragment_src: &[u8]) -> Result<GLuint, GlslError> {
    let vertex   = compile_shader(vertex_src, gl::VERTEX_SHADER)?;
    let fragment = match compile_shader(fragment_src, gl::FRAGMENT_SHADER) {
        Ok(fragment) => fragment,
        Err(error)   => {
            unsafe { gl::DeleteShader(vertex); }
            return Err(error);
        },
    };

    let program = link_shaders(&[vertex, fragment]);
    unsafe {
        // the program keeps its own reference once linked
        gl::DeleteShader(vertex);
        gl::DeleteShader(fragment);
    }
    program
}

pub fn compile_shader(src: &[u8], ty: GLenum) -> Result<GLuint, GlslError> {
    unsafe {
        let shader = gl::CreateShader(ty);
        gl::ShaderSource(
            shader,
            1,
            &(src.as_ptr() as *const GLchar) as *const *const GLchar,
            &(src.len() as GLint) as *const GLint,
        );
        gl::CompileShader(shader);

        // check shader compile errors
        let mut status: GLint = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status == gl::TRUE as GLint {
            Ok(shader)
        } else {
            let info_log = get_shader_info_log(shader);
            gl::DeleteShader(shader);

            let shader_name = match ty {
                gl::VERTEX_SHADER   => "Vertex Shader",
                gl::FRAGMENT_SHADER => "Fragment Shader",
                _                   => "(unknown shader type)",
            };
            Err(GlslError::from(format!("{} compile error:\n{}", shader_name, &info_log)))
        }
    }
}

pub fn link_shaders(shaders: &[GLuint]) -> Result<GLuint, GlslError> {
    unsafe {
        let program = gl::CreateProgram();
        for &shader in shaders {
            gl::AttachShader(program, shader);
        }
        gl::LinkProgram(program);

        // check program link errors
        let mut status: GLint = 0;
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

        if status == gl::TRUE as GLint {
            for &shader in shaders {
                gl::DetachShader(program, shader);
            }
            Ok(program)
        } else {
            let info_log = get_program_info_log(program);
            gl::DeleteProgram(program);

            Err(GlslError::from(format!("Shader Program link error:\n{}", &info_log)))
        }
    }
}

pub fn get_program_info_log(program: GLuint) -> String {
    get_generic_info_log(program, gl::GetProgramiv, gl::GetProgramInfoLog)
}

pub fn get_shader_info_log(shader: GLuint) -> String {
    get_generic_info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog)
}

fn get_generic_info_log(
    name:         GLuint,
    get_param:    unsafe fn(GLuint, GLenum, *mut GLint),
    get_info_log: unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
) -> String {
    unsafe {
        let mut info_log_len: GLsizei = 0;
        get_param(name, gl::INFO_LOG_LENGTH, &mut info_log_len as *mut GLsizei);

        if info_log_len <= 0 { return String::new(); }

        let mut buffer = vec![0_u8; info_log_len as usize];
        let mut written: GLsizei = 0;
        get_info_log(name, info_log_len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
        buffer.truncate(written.max(0) as usize);

        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_the_info_log_verbatim() {
        let error = GlslError::from(format!("{} compile error:\n{}", "Fragment Shader", "0:3: bad"));
        assert_eq!(error.to_string(), "Fragment Shader compile error:\n0:3: bad");
    }
}
