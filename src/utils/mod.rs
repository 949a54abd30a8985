//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup, request metadata and helper functions.

pub mod errors;
pub mod logging;
pub mod helpers;
pub mod request;

pub use errors::{BandVoteError, Result};
