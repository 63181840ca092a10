mod classify;
mod config;
mod diag;
mod engine;
mod errors;
mod literal;
mod mode;
mod report;
mod rewrite;
pub mod simulate;

pub use classify::*;
pub use config::*;
pub use diag::*;
pub use engine::*;
pub use errors::*;
pub use literal::*;
pub use mode::*;
pub use report::*;
pub use rewrite::*;
pub use simulate::simulate;
