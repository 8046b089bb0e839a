//! Error types for particle-forms.
//!
//! Parameter problems never surface here: out-of-range values are clamped by
//! [`ParameterSet::sanitized`](crate::ParameterSet::sanitized) and oversized
//! samples are truncated with a warning. What remains are unknown shape
//! selectors, snapshot projection failures, and viewer start-up failures.

use std::fmt;
use std::path::PathBuf;

/// Error parsing a shape selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The selector matched no registered shape kind.
    Unknown(String),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Unknown(id) => write!(f, "Unknown shape kind '{}'", id),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Errors from snapshot and gallery-config projection.
#[derive(Debug)]
pub enum SnapshotError {
    /// Failed to read or write a file.
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
    /// Failed to encode or decode JSON.
    Json(serde_json::Error),
    /// The store already holds its maximum number of snapshots.
    Full { limit: usize },
    /// No snapshot with this id exists.
    NotFound(u64),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io { path, error } => {
                write!(f, "Failed to access {}: {}", path.display(), error)
            }
            SnapshotError::Json(e) => write!(f, "Failed to encode/decode snapshot JSON: {}", e),
            SnapshotError::Full { limit } => {
                write!(f, "Snapshot store is full ({} snapshots). Delete one before saving.", limit)
            }
            SnapshotError::NotFound(id) => write!(f, "No snapshot with id {}", id),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io { error, .. } => Some(error),
            SnapshotError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

/// Errors that can occur during GPU initialization.
#[cfg(feature = "viewer")]
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

#[cfg(feature = "viewer")]
impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

#[cfg(feature = "viewer")]
impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

#[cfg(feature = "viewer")]
impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the viewer.
#[cfg(feature = "viewer")]
#[derive(Debug)]
pub enum ViewerError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to open the window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

#[cfg(feature = "viewer")]
impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Failed to run event loop: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

#[cfg(feature = "viewer")]
impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Gpu(e) => Some(e),
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

#[cfg(feature = "viewer")]
impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

#[cfg(feature = "viewer")]
impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_shape_error_display() {
        let e = ShapeError::Unknown("dodecahedron".into());
        assert_eq!(e.to_string(), "Unknown shape kind 'dodecahedron'");
    }

    #[test]
    fn test_snapshot_error_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e: SnapshotError = json_err.into();
        assert!(e.source().is_some());

        let full = SnapshotError::Full { limit: 20 };
        assert!(full.source().is_none());
        assert!(full.to_string().contains("20"));
    }
}
