// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Public-port derivation from upstream endpoint URLs.

use url::Url;

/// Extract the proxy-facing public port from an upstream URL.
///
/// An explicit port wins; otherwise `http` maps to "80" and `https` to
/// "443". Returns "" for other schemes and for URLs that do not parse;
/// callers drop port records with an empty public port.
pub fn public_port_str(url_str: &str) -> String {
    let url = match Url::parse(url_str) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(url = url_str, error = %e, "error parsing upstream URL while deriving public port");
            return String::new();
        }
    };

    match url.port() {
        Some(port) => port.to_string(),
        None => match url.scheme() {
            "http" => "80".to_string(),
            "https" => "443".to_string(),
            _ => String::new(),
        },
    }
}

#[cfg(test)]
#[path = "port_tests.rs"]
mod tests;
