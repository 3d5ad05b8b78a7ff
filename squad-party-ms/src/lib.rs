#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate log;

extern crate serde_json;

extern crate squad_common;

pub mod config;
pub mod engine;
