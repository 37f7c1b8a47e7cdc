pub mod query;
pub mod time;

pub use query::*;
pub use time::*;
