//
//  satellite-link
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Credentials File I/O Module
//!
//! This module locates and parses `ibm-credentials.env` style credentials files.
//!
//! ## File Format
//!
//! ```text
//! # Satellite Link
//! SATELLITE_LINK_URL=https://api.link.satellite.cloud.ibm.com
//! SATELLITE_LINK_AUTH_TYPE=bearerToken
//! SATELLITE_LINK_BEARER_TOKEN=eyJhbGciOi...
//! ```
//!
//! - One `KEY=VALUE` entry per line, split at the first `=`
//! - Blank lines and lines starting with `#` are ignored
//! - Keys and values are trimmed
//!
//! ## Lookup Order
//!
//! 1. The path named by `IBM_CREDENTIALS_FILE`
//! 2. `ibm-credentials.env` in the user's home directory
//! 3. `ibm-credentials.env` in the current working directory

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::api::common::Error;

/// Environment variable naming an explicit credentials file.
pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

/// File name searched for in the home and working directories.
pub const DEFAULT_CREDENTIALS_FILE_NAME: &str = "ibm-credentials.env";

/// Returns the credentials file to read, if any.
///
/// # Parameters
///
/// * `explicit` - The value of `IBM_CREDENTIALS_FILE`, if set
///
/// # Returns
///
/// - The explicit path when one is given, whether or not it exists, so that a
///   misconfigured path is reported instead of silently ignored
/// - Otherwise the first existing default location, or `None`
pub fn locate_credentials_file(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }

    let home = BaseDirs::new().map(|dirs| dirs.home_dir().join(DEFAULT_CREDENTIALS_FILE_NAME));
    let cwd = std::env::current_dir()
        .ok()
        .map(|dir| dir.join(DEFAULT_CREDENTIALS_FILE_NAME));

    [home, cwd].into_iter().flatten().find(|path| path.is_file())
}

/// Reads a credentials file.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the file cannot be read.
pub fn read_credentials_file(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|e| {
        Error::Configuration(format!(
            "failed to read credentials file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Parses credentials file content into `(key, value)` pairs, in file order.
///
/// Lines without `=` are skipped.
///
/// # Example
///
/// ```rust
/// use satellite_link::config::parse_credentials;
///
/// let entries = parse_credentials("# comment\nA=1\n\n B = x=y \nbroken\n");
/// assert_eq!(entries, vec![
///     ("A".to_string(), "1".to_string()),
///     ("B".to_string(), "x=y".to_string()),
/// ]);
/// ```
pub fn parse_credentials(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
