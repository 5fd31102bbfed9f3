//! Embedded sample dataset
//!
//! A small leaked-password frequency list compiled into the binary at build time.

// Include the generated table from the build script
include!(concat!(env!("OUT_DIR"), "/sample.rs"));
