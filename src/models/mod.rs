pub mod category;
pub mod evaluation;
pub mod prediction;
pub mod reading;

pub use category::*;
pub use evaluation::*;
pub use prediction::*;
pub use reading::*;
