pub mod parser;
pub mod path_resolution;
pub mod query;

pub use parser::*;
pub use path_resolution::*;
pub use query::*;
