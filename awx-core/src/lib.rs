//! AWX Core
//!
//! Core types and pure logic for launching AWX / Ansible Tower job
//! templates.
//!
//! This crate contains:
//! - Job domain types: status enumeration, launch and poll records
//! - Launch request construction: extra-vars merging and redaction
//! - Output post-processing: resource-name extraction from job stdout
//!
//! Note: all HTTP communication lives in `awx-client`; the binary glue
//! lives in `awx-cli`.

pub mod job;
pub mod launch;
pub mod output;
