//! Golden-file tests for the downcast checker live in `tests/golden.rs`, driven by the
//! sources under `cases/`.
