pub mod chat;
pub mod consultant;
pub mod dataset;
pub mod query;
pub mod upload;

pub use chat::*;
pub use consultant::*;
pub use dataset::*;
pub use query::*;
pub use upload::*;
