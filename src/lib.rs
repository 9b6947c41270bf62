//! Localization asset transfer for the TwoSky and OneSky translation
//! services: translated strings files and fastlane store metadata.

pub mod cli;
pub mod error;
pub mod model;
pub mod parsers;
pub mod services;
pub mod settings;

pub use error::{Error, Result};
