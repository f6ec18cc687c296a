pub mod color;
pub mod draw;
pub mod traits;
#[cfg(feature = "vectors")]
pub mod tessellate;

pub use color::{Color, ColorError};
pub use draw::{DrawCommand, DrawList, DrawRecord};
pub use traits::Surface;
#[cfg(feature = "vectors")]
pub use tessellate::{MeshVertex, TableMesh};
