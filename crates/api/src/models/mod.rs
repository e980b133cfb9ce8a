pub mod dump;
pub mod location;
pub mod moniker;

pub use dump::*;
pub use location::*;
pub use moniker::*;
