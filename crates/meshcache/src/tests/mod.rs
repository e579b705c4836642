mod fixtures;

mod config;
mod quad_key;
mod reader;
