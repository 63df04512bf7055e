//! Filtered object-to-document serialization.
//!
//! This crate re-exports the workspace members under short names:
//!
//! - [`filter`]: inclusion policies, property filters, schema registries and
//!   the serializers that apply them on top of any `serde` serializer.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_filter as filter;
