pub mod bench;
pub mod check;
pub mod edit;
pub mod file;
pub mod grammar;
pub mod scan;
