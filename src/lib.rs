pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod keyset;
pub mod table;
// cmd and reports are binary modules (see main.rs).
