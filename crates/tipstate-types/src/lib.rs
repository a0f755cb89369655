pub mod amount;
pub mod domain;
pub mod error;
pub mod version;
mod util;

pub use amount::{Amount, TokenAmount};
pub use domain::*;
pub use error::{Error, Result};
pub use util::*;
pub use version::{VersionMapping, VersionTag};
