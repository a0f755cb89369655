pub mod tip;
pub mod url;

pub use tip::*;
pub use url::*;
