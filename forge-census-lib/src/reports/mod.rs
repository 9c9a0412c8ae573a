//! Report rendering
//!
//! Both generators take the same [`Report`](crate::facts::Report) and write it
//! into any [`core::fmt::Write`]. The encodings are interchangeable: they carry
//! the same two top-level keys, `projects` and `statistics`, with the same content.

mod json;
mod yaml;

pub use json::generate as generate_json;
pub use yaml::generate as generate_yaml;
