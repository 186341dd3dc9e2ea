//! Command modules - one file per CLI command

pub mod extract;
pub mod hash;
