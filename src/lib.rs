//! AADE Publicity Lookup Library
//!
//! Client for the Greek tax registry's public "RgWsPublic2" SOAP service:
//! builds the lookup envelope for a VATID (AFM), sends it, and normalizes the
//! response into a flat company record with its activity sectors.
//!
//! # Modules
//!
//! - `client`: The lookup orchestrator and `get_company_publicity`.
//! - `config`: Environment configuration for the binaries.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers of the lookup service.
//! - `models`: Request and result types.
//! - `normalizer`: Response envelope to `NormalizedResult`.
//! - `observer`: Progress hook for a lookup.
//! - `request`: Request envelope builder.
//! - `xml_tree`: Owned XML tree the normalizer works on.

pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod observer;
pub mod request;
pub mod xml_tree;

pub use client::{get_company_publicity, ClientOptions, PublicityClient};
pub use errors::AppError;
pub use models::{CompanyRecord, CompanySector, Credentials, NormalizedResult, SearchRequest};
pub use normalizer::normalize;
