mod constants;
mod objs;

pub use constants::*;
pub use objs::*;
pub use rstest::*;
