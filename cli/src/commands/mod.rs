pub mod config;
pub mod delete;
pub mod get;
pub mod publish;
pub mod update;
