pub mod alphabet;
pub mod api;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod language;
pub mod mixed;
pub mod scorer;
// cmd and reports belong to the binary crate (main.rs).
