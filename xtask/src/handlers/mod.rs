pub mod run;
pub mod setup;
pub mod testing;
