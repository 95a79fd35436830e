pub mod config;
pub mod output;
pub mod player;
pub mod provider;
pub mod runner;
pub mod scoring;
pub mod tier;
