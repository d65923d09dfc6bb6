//! Small, self-contained data structures used across the project.

pub mod index_ring;
pub mod stack;

pub use index_ring::IndexRing;
pub use stack::ElementStack;
