//! Soroban contract event decoding.
//!
//! This library turns the event definitions a Soroban contract publishes in its
//! interface listing into decoders that validate raw contract events and expose
//! their fields as native values. It includes:
//!
//! - Loading interface listings from compiled contracts, JSON or base64 XDR
//! - Extraction of event descriptors and mapping of their wire types
//! - A validating decoder per event with lazily decoded, cached fields
//! - A catalog routing raw events to the event they belong to
//!
//! # Module Structure
//!
//! - `models`: Descriptors, wire and native types, raw event records
//! - `services`: Listing loading, extraction, type mapping and decoding
//! - `utils`: Logging, error context and parsing helpers

pub mod models;
pub mod services;
pub mod utils;
