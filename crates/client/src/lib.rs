//! Client code for regal-rss.
//!
//! This crate provides the upstream listing client and the `FilmSource`
//! seam the refresh policy is written against.

pub mod regal;

pub use regal::{FilmSource, ListingRequest, RegalClient, RegalConfig, UpstreamError, listing_date};
