pub mod category;
pub mod config;
pub mod detail;
pub mod project;
pub mod section;
pub mod session;
pub mod wire;

pub use category::{Category, Icon};
pub use config::*;
pub use detail::*;
pub use project::*;
pub use section::*;
pub use session::*;
