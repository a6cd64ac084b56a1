// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! On-wire framing for the two client-facing protocols in §6: the pipeline front-end's
//! request/response shape, and the single-shot dispatch front-end's request/response shape.
//!
//! Deliberately thin: this crate only turns bytes into validated request structs (and vice
//! versa for responses). It owns none of the algorithmic or concurrency logic — those live in
//! `dispatch` and `pipeline`.

pub mod dispatch;
pub mod error;
pub mod pipeline;

pub use error::WireError;

use tokio::io::{AsyncRead, AsyncReadExt};

/// `0 < vertices <= 50` per §6's constraints on both protocols.
pub const MAX_VERTICES: i32 = 50;

/// Reads one 4-byte integer in the host's native byte order, per §6 ("host byte order").
pub(crate) async fn read_i32<R: AsyncRead + Unpin>(reader: &mut R) -> Result<i32, WireError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).await?;
    Ok(i32::from_ne_bytes(buf))
}
