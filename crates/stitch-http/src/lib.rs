//! stitch-http - Network content source over the hosted table API.

mod client;
mod source;

pub use source::HttpSource;
