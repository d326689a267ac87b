pub mod layer;

pub use layer::{Layer, LayerKind, INIT_RANGE};
