pub mod run;
pub mod surface;
