//! Core library for blogcms
//!
//! This crate implements the **Functional Core** of the blogcms application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The blogcms project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`blogcms_core`** (this crate): Pure transformation functions with zero I/O
//! - **`blogcms`**: HTTP calls to microCMS, the HTTP server and the CLI (the Imperative Shell)
//!
//! Every function here is deterministic and can be tested with plain fixture
//! data; nothing talks to the network or reads the environment.
//!
//! # Module Organization
//!
//! - [`article`]: Domain model served to readers
//! - [`queries`]: Query string parameters to microCMS / sample queries
//! - [`domain`]: Service domain normalization
//! - [`cms`]: microCMS response types and their mapping to articles
//! - [`sample`]: Sample articles used when no credentials are configured
//! - [`markdown`]: Article body rendering
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use blogcms_core::queries::{build_sample_queries, collect_query_pairs};
//! use blogcms_core::sample::build_sample_list_response;
//!
//! let raw = collect_query_pairs(vec![
//!     ("limit".to_string(), "1".to_string()),
//!     ("offset".to_string(), "1".to_string()),
//! ]);
//!
//! let page = build_sample_list_response(&build_sample_queries(&raw));
//!
//! assert_eq!(page.total_count, 2);
//! assert_eq!(page.contents.len(), 1);
//! ```

pub mod article;
pub mod cms;
pub mod domain;
pub mod markdown;
pub mod queries;
pub mod sample;
