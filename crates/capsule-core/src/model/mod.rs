pub mod capsule;
pub mod catalog;
pub mod status;

pub use capsule::Capsule;
pub use catalog::{Catalog, Catalogs};
pub use status::Status;
