pub mod config;
pub mod pipeline;
pub mod report;
pub mod support;
pub mod tfs;
