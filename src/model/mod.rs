pub mod catalog;
pub mod course;
pub mod match_record;
pub mod round;
pub mod score;
pub mod utils;

pub use catalog::*;
pub use course::*;
pub use match_record::*;
pub use round::*;
pub use score::*;
pub use utils::*;
