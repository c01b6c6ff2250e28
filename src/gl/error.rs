use super::*;

use thiserror::Error;

/// Every error code drained from `glGetError`, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", describe(.codes))]
pub struct GlError {
    pub codes: Vec<GLenum>,
}

pub fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::INVALID_ENUM                  => "INVALID_ENUM",
        gl::INVALID_VALUE                 => "INVALID_VALUE",
        gl::INVALID_OPERATION             => "INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY                 => "OUT_OF_MEMORY",
        _                                 => "UNKNOWN_ERROR",
    }
}

fn describe(codes: &[GLenum]) -> String {
    codes.iter()
        .map(|&code| format!("{} (0x{:04X})", error_name(code), code))
        .collect::<Vec<_>>()
        .join(", ")
}

// glGetError keeps returning flags until each one has been read back
const MAX_DRAINED_ERRORS: usize = 16;

pub fn get_error() -> Result<(), GlError> {
    let mut codes = Vec::new();
    while codes.len() < MAX_DRAINED_ERRORS {
        let next_error = unsafe { gl::GetError() };
        if next_error == gl::NO_ERROR {
            break;
        }
        codes.push(next_error);
    }
    if codes.is_empty() {
        Ok(())
    } else {
        Err(GlError { codes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_each_code_in_order() {
        let error = GlError { codes: vec![gl::INVALID_VALUE, gl::OUT_OF_MEMORY, 0x1234] };
        assert_eq!(
            error.to_string(),
            "INVALID_VALUE (0x0501), OUT_OF_MEMORY (0x0505), UNKNOWN_ERROR (0x1234)",
        );
    }
}
