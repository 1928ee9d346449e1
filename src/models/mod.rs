pub mod alignment;
pub mod line;

pub use alignment::*;
pub use line::*;
