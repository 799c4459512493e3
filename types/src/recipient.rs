//! Payment recipients: a derivation index, its display path, and the address.

use serde::{Deserialize, Serialize};

/// One payment destination produced by the derivation layer.
///
/// The engines never construct these; they only pair them with amounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Non-hardened derivation index.
    pub index: u32,
    /// Display path, e.g. `m/0/17`.
    pub path: String,
    /// Encoded destination address.
    pub address: String,
}

impl Recipient {
    pub fn new(index: u32, base_path: &str, address: String) -> Self {
        Self {
            index,
            path: derivation_path(base_path, index),
            address,
        }
    }
}

/// Render the display form of a derivation path.
///
/// An empty base yields `m/<index>`; otherwise `m/<base>/<index>`.
pub fn derivation_path(base_path: &str, index: u32) -> String {
    if base_path.is_empty() {
        format!("m/{index}")
    } else {
        format!("m/{base_path}/{index}")
    }
}
