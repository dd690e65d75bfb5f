pub mod patient;
pub mod specialist;

pub use patient::*;
pub use specialist::*;
