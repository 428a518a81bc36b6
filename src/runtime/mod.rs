//! Runtime backends
//!
//! Each backend provides a client type implementing the operation traits in
//! [`crate::ops`]. The CPU backend is the only one; tensors whose storage
//! lives elsewhere are rejected with
//! [`Error::RemoteBuffer`](crate::error::Error::RemoteBuffer).

pub mod cpu;
