pub mod scoring;
pub mod state;
pub mod strokes;
pub mod summary;

pub use scoring::*;
pub use state::*;
pub use strokes::*;
pub use summary::*;
