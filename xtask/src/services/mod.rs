pub mod process;
pub mod utils;
