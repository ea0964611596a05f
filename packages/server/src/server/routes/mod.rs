// HTTP routes
pub mod extract;
pub mod health;
pub mod schema;
pub mod templates;

pub use extract::*;
pub use health::*;
pub use schema::*;
pub use templates::*;
