pub mod cfg;
pub mod constant;
pub mod error;
pub mod logging;
pub mod product;
pub mod req;
pub mod server;
pub mod svc;
pub mod utils;

pub use error::{CatalogError, Result};
pub use product::model::{Product, ProductDetail};
pub use product::repo::ProductRepository;
