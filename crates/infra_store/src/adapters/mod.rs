//! Domain Adapters
//!
//! Each adapter implements a domain port over a file on disk and translates
//! storage failures into [`core_kernel::PortError`].

pub mod users;

pub use users::JsonFileUserStore;
