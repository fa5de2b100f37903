use std::fmt;

/// Shader program failures. Logged at setup; the game keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The WGSL module failed validation
    Compile(String),
    /// The render pipeline could not be built from the module
    Link(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile(msg) => write!(f, "shader compile error: {msg}"),
            ShaderError::Link(msg) => write!(f, "shader linking error: {msg}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Fatal errors while bringing up the window and GPU.
#[derive(Debug)]
pub enum SetupError {
    WindowCreation(winit::error::OsError),
    Surface(wgpu::CreateSurfaceError),
    Adapter(wgpu::RequestAdapterError),
    Device(wgpu::RequestDeviceError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::WindowCreation(e) => write!(f, "failed to create window: {e}"),
            SetupError::Surface(e) => write!(f, "failed to create surface: {e}"),
            SetupError::Adapter(e) => write!(f, "no suitable GPU adapter: {e}"),
            SetupError::Device(e) => write!(f, "failed to request device: {e}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::WindowCreation(e) => Some(e),
            SetupError::Surface(e) => Some(e),
            SetupError::Adapter(e) => Some(e),
            SetupError::Device(e) => Some(e),
        }
    }
}

impl From<winit::error::OsError> for SetupError {
    fn from(e: winit::error::OsError) -> Self {
        SetupError::WindowCreation(e)
    }
}

impl From<wgpu::CreateSurfaceError> for SetupError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        SetupError::Surface(e)
    }
}

impl From<wgpu::RequestAdapterError> for SetupError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        SetupError::Adapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for SetupError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        SetupError::Device(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_error_messages() {
        let compile = ShaderError::Compile("bad token".into());
        let link = ShaderError::Link("missing entry point".into());
        assert_eq!(compile.to_string(), "shader compile error: bad token");
        assert_eq!(link.to_string(), "shader linking error: missing entry point");
    }
}
