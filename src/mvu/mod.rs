pub mod round;
pub mod runtime;
