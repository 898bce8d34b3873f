pub mod analysis;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod output;
pub mod scoring;
