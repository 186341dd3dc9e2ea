//! jarbom - recover Maven coordinates from a pile of jars
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Points at a directory or a `.tar`/`.tar.gz` bundle, identifies every jar
//! inside it, and writes the result as a Maven BOM.
//!
//! # Identification
//!
//! - **Embedded metadata**: `META-INF/maven/<g>/<a>/pom.properties`, read
//!   straight from the jar.
//! - **Checksum**: the jar's SHA-1 looked up in the Maven Central search
//!   index, with the file name breaking ties between several hits.
//!
//! Jars neither tier identifies can be copied aside with `--unknown-dir`.

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use jarbom_core::USER_AGENT;

#[derive(Debug, Parser)]
#[command(name = "jarbom")]
#[command(author, version, about = "jarbom - build a Maven BOM from a directory or tarball of jars")]
pub struct Cli {
    /// Suppress per-jar output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Identify every jar under a source and write a BOM
    Extract(ExtractArgs),
    /// Print the SHA-1 of files, as used for checksum lookups
    Hash {
        /// Files to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, clap::Args)]
pub struct ExtractArgs {
    /// Directory to walk, or a .tar / .tar.gz to stream
    #[arg(long, short, env = "JARBOM_SOURCE", default_value = ".")]
    pub source: PathBuf,

    /// Where to write the BOM
    #[arg(long, short, env = "JARBOM_OUTPUT", default_value = "pom.xml")]
    pub output: PathBuf,

    /// Copy jars that cannot be identified into this directory
    #[arg(long, env = "JARBOM_UNKNOWN_DIR")]
    pub unknown_dir: Option<PathBuf>,

    /// Checksum search endpoint
    #[arg(long, env = "JARBOM_ENDPOINT", default_value = jarbom_core::central::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Connect timeout for the search endpoint, in seconds
    #[arg(long, env = "JARBOM_CONNECT_TIMEOUT", default_value_t = 20)]
    pub connect_timeout: u64,

    /// Directory for scratch copies of tar entries
    #[arg(long, env = "JARBOM_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Only use embedded metadata; never contact the search endpoint
    #[arg(long, env = "JARBOM_OFFLINE")]
    pub offline: bool,

    /// groupId of the generated BOM
    #[arg(long, env = "JARBOM_BOM_GROUP_ID", default_value = "extracted")]
    pub bom_group_id: String,

    /// artifactId of the generated BOM
    #[arg(long, env = "JARBOM_BOM_ARTIFACT_ID", default_value = "bom")]
    pub bom_artifact_id: String,

    /// version of the generated BOM
    #[arg(long, env = "JARBOM_BOM_VERSION", default_value = "1.0.0-SNAPSHOT")]
    pub bom_version: String,
}

impl ExtractArgs {
    /// Map the flags onto a run configuration.
    pub fn into_config(self) -> jarbom_core::RunConfig {
        jarbom_core::RunConfig {
            source: self.source,
            output: self.output,
            unknown_dir: self.unknown_dir,
            endpoint: self.endpoint,
            connect_timeout: std::time::Duration::from_secs(self.connect_timeout),
            scratch_dir: self.scratch_dir,
            offline: self.offline,
            bom: jarbom_core::BomIdentity {
                group_id: self.bom_group_id,
                artifact_id: self.bom_artifact_id,
                version: self.bom_version,
            },
        }
    }
}
