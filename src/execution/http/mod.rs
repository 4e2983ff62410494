//! HTTP plumbing: headers and the transport seam.

pub mod headers;
pub mod transport;
