//! Statically compiled content from data/*.json.
//! Generated at build time by build.rs; no runtime JSON parsing needed.

include!(concat!(env!("OUT_DIR"), "/content_generated.rs"));
