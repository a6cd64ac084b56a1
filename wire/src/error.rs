// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

use std::fmt;
use std::io;

/// Everything that can go wrong parsing a request off the wire. Every variant here is a "bad
/// client payload" in the §7 error taxonomy: the connection is dropped (pipeline front-end) or
/// answered with `status=0` (single-shot front-end), and neither ever propagates past the
/// handler that observed it.
#[derive(Debug)]
pub enum WireError {
    Io(io::Error),
    ShortRead,
    InvalidVertexCount(i32),
    InvalidAlgorithmId(i32),
    InvalidEdgeCount { declared: i32, max: i32 },
    InvalidEdge { u: i32, v: i32, w: i32, n: i32 },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Io(e) => write!(f, "I/O error: {e}"),
            WireError::ShortRead => write!(f, "connection closed before a full frame was read"),
            WireError::InvalidVertexCount(n) => {
                write!(f, "vertex count {n} out of range (0, 50]")
            }
            WireError::InvalidAlgorithmId(id) => write!(f, "algorithm id {id} out of range [1, 5]"),
            WireError::InvalidEdgeCount { declared, max } => write!(
                f,
                "edge count {declared} out of range [0, {max}]"
            ),
            WireError::InvalidEdge { u, v, w, n } => write!(
                f,
                "edge ({u},{v},{w}) invalid for n={n} (endpoints must be in [0,n), weight > 0)"
            ),
        }
    }
}

impl std::error::Error for WireError {}

impl From<io::Error> for WireError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            WireError::ShortRead
        } else {
            WireError::Io(e)
        }
    }
}
