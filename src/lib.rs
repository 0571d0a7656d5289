#![forbid(unsafe_code)]

pub mod buffers;
pub mod config;
pub mod error;
pub mod export;
pub mod frustum;
pub mod mesh;
pub mod project;
pub mod projector;
pub mod quad;
pub mod underlay;

pub use buffers::{ColorBuffer, DepthBuffer, Rgba};
pub use config::ProjectionConfig;
pub use error::{PixmeshError, PixmeshResult};
pub use export::write_ply;
pub use frustum::{CameraFrustum, PixelRays, ViewFrame};
pub use mesh::QuadMesh;
pub use project::{PixelFootprint, intersect_line_plane, project_pixel};
pub use projector::{
    ProjectionStats, project, project_parallel, project_with_observer, project_with_stats,
};
pub use quad::{EdgeScale, append_quad};
pub use underlay::{UnderlayTriggers, classify, resolve_horizontal, resolve_vertical};
