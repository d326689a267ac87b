pub mod node;
pub mod edge;

pub use node::Node;
pub use edge::Edge;
