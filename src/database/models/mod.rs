pub mod status;
pub mod history;

pub use status::*;
pub use history::*;
