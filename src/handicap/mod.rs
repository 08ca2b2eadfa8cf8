pub mod budget;
pub mod index;
pub mod series;
pub mod snapshot;

pub use budget::*;
pub use index::*;
pub use series::*;
pub use snapshot::*;
