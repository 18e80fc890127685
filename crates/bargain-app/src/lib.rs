// Library root: configuration and the end-to-end pipeline, exposed so the
// integration tests can drive a run without spawning the binary.

pub mod config;
pub mod pipeline;
