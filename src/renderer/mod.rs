//! Host-agnostic rendering
//!
//! Produces plain triangle lists in field coordinates (y down). The host
//! uploads them with whatever graphics API it owns and draws text on top.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::build_scene;
pub use vertex::Vertex;
