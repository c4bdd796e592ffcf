//! Remote vision provider integration.
//!
//! This module holds the provider-facing half of the service: the
//! `VisionProvider` abstraction, its Azure Computer Vision implementation,
//! and the wire types for analyze and OCR payloads.
//!
//! # Submodules
//!
//! - `client`: The `VisionProvider` trait and `AzureVisionClient`.
//! - `models`: Feature sets, provider payloads, and image format sniffing.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod client;
pub mod models;

pub use client::{AzureVisionClient, VisionProvider};
pub use models::{FeatureSet, ImageFormat, VisualFeature};
