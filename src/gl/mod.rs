use super::*;

use std::ffi::CString;

mod bindings {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}
pub use crate::gl::bindings::*;

mod error;
pub use crate::gl::error::*;

mod shader;
pub use crate::gl::shader::*;

use crate::gl::types::*;

fn c_name(name: &str) -> Result<CString, GlslError> {
    CString::new(name).map_err(|_| GlslError::from(format!("`{}` contains a nul byte", name)))
}

#[inline]
pub fn get_uniform_location(program: GLuint, name: &str) -> Result<GLint, GlslError> {
    let c_name   = c_name(name)?;
    let location = unsafe { gl::GetUniformLocation(program, c_name.as_ptr() as *const GLchar) };

    if location != -1 {
        Ok(location)
    } else {
        Err(GlslError::from(format!("uniform `{}` not found in program {}", name, program)))
    }
}

#[inline]
pub fn get_attrib_location(program: GLuint, name: &str) -> Result<GLuint, GlslError> {
    let c_name   = c_name(name)?;
    let location = unsafe { gl::GetAttribLocation(program, c_name.as_ptr() as *const GLchar) };

    if location != -1 {
        Ok(location as GLuint)
    } else {
        Err(GlslError::from(format!("attribute `{}` not found in program {}", name, program)))
    }
}

#[inline]
pub unsafe fn buffer_data<T>(target: GLenum, data: &[T], usage: GLenum) {
    gl::BufferData(
        target,
        mem::size_of_val(data) as GLsizeiptr,
        data.as_ptr() as *const GLvoid,
        usage,
    );
}

#[inline]
pub unsafe fn buffer_init<T>(target: GLenum, count: usize, usage: GLenum) {
    gl::BufferData(
        target,
        (mem::size_of::<T>() * count) as GLsizeiptr,
        ptr::null(),
        usage,
    );
}

#[inline]
pub unsafe fn gen_object(gen_callback: unsafe fn (GLsizei, *mut GLuint)) -> GLuint {
    let mut name = GLuint::default();
    gen_callback(1, &mut name);
    name
}

/// Binds `location` to `components` floats at `offset` bytes into each `stride`-byte vertex
/// of the currently bound array buffer.
#[inline]
pub unsafe fn float_attrib(location: GLuint, components: GLint, stride: usize, offset: usize) {
    gl::EnableVertexAttribArray(location);
    gl::VertexAttribPointer(
        location, components, gl::FLOAT, gl::FALSE,
        stride as GLsizei,
        offset as *const GLvoid,
    );
}

/// The `GL_VERSION` string of the current context.
pub fn version() -> String {
    unsafe {
        let version = gl::GetString(gl::VERSION);
        if version.is_null() {
            String::from("(unknown)")
        } else {
            std::ffi::CStr::from_ptr(version as *const GLchar).to_string_lossy().into_owned()
        }
    }
}

/// Points the uniform block `name` of `program` at `binding`.
pub fn bind_uniform_block(program: GLuint, name: &str, binding: GLuint) -> Result<(), GlslError> {
    let c_name = c_name(name)?;
    unsafe {
        let index = gl::GetUniformBlockIndex(program, c_name.as_ptr() as *const GLchar);
        if index == gl::INVALID_INDEX {
            return Err(GlslError::from(format!("uniform block `{}` not found in program {}", name, program)));
        }
        gl::UniformBlockBinding(program, index, binding);
    }
    Ok(())
}
