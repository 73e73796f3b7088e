//! # Skyhook Linkgen - Genesis link generator for the Skyhook indirect channel
//!
//! This library provisions the initial ("genesis") set of point-to-point
//! links for an overlay network of client and server nodes. Given the
//! physical topology (range config) and the links the network manager asked
//! for (NM request), it decides which requests this channel is responsible
//! for, assigns creator/loader roles, and produces the storage addressing
//! each node is preloaded with before the network starts.
//!
//! ## Key Features
//!
//! - **Deterministic roles**: clients always load; between servers the
//!   lexicographically smaller id creates
//! - **One link per pair**: any number of requests between the same two
//!   nodes share a single physical link
//! - **Fulfillment accounting**: a record of every claimed request, for
//!   comparison against the original request
//! - **Total coverage**: every node in the range config gets an entry, even
//!   with no links
//!
//! ## Architecture
//!
//! - `config`: Range config, NM request and generation settings types
//! - `config_loader`: Document loading and default NM request generation
//! - `registry`: Node registry with client/server classification
//! - `links`: Role resolution, pair deduplication, link synthesis,
//!   fulfillment tracking and the fulfillment engine
//! - `output`: Config directory preparation and JSON persistence
//! - `orchestrator`: End-to-end generation of the config directory
//! - `utils`: Input validation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use skyhook_linkgen::config::GenerationSettings;
//! use skyhook_linkgen::registry::NodeRegistry;
//! use skyhook_linkgen::{config_loader, orchestrator, output};
//! use std::path::Path;
//!
//! let range = config_loader::load_range_config(Path::new("2x2.json"))?;
//! let registry = NodeRegistry::from_range_config(&range)?;
//! let request = config_loader::load_nm_request(Path::new("nm-request.json"))?;
//!
//! let config_dir = Path::new("configs");
//! output::prepare_config_dir(config_dir, true)?;
//! let report = orchestrator::generate_configs(&registry, &request, config_dir, &GenerationSettings::default())?;
//! println!("{} of {} requests fulfilled", report.fulfilled, report.requested);
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Library components return `thiserror` enums (`ValidationError`,
//! `LinkError`, `OutputError`); loading and orchestration wrap them in
//! `color_eyre` reports with context.

pub mod config;
pub mod config_loader;
pub mod registry;
pub mod links;
pub mod output;
pub mod orchestrator;
pub mod utils;
