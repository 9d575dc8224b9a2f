pub mod compare;
pub mod config;
pub mod enhance;
pub mod info;
pub mod run;
