// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The single-shot dispatch front-end's request/response framing (§6, "Single-shot dispatch
//! wire protocol"). Unlike the pipeline protocol, every field here is explicitly length-prefixed
//! by the spec itself, so there is no framing ambiguity to resolve.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use graphcore::Graph;

use crate::error::WireError;
use crate::{read_i32, MAX_VERTICES};

#[derive(Debug, Clone)]
pub enum DispatchRequest {
    /// Algorithm ids 1 (Euler), 4 (MaxClique), 5 (CliqueCount): an `n x n` 0/1 adjacency matrix.
    Unweighted {
        algorithm_id: i32,
        n: i32,
        adjacency: Vec<i32>,
    },
    /// Algorithm ids 2 (MaxFlow), 3 (MST): an explicit edge list.
    Weighted {
        algorithm_id: i32,
        n: i32,
        edges: Vec<(i32, i32, i32)>,
    },
}

impl DispatchRequest {
    pub fn algorithm_id(&self) -> i32 {
        match self {
            DispatchRequest::Unweighted { algorithm_id, .. } => *algorithm_id,
            DispatchRequest::Weighted { algorithm_id, .. } => *algorithm_id,
        }
    }

    pub fn build_graph(&self) -> Graph {
        match self {
            DispatchRequest::Unweighted { n, adjacency, .. } => {
                let n = *n as usize;
                let mut g = Graph::new(n).expect("bounded by MAX_VERTICES");
                for i in 0..n {
                    for j in (i + 1)..n {
                        if adjacency[i * n + j] != 0 {
                            let _ = g.add_edge(i, j, 1);
                        }
                    }
                    if adjacency[i * n + i] != 0 {
                        let _ = g.add_edge(i, i, 1);
                    }
                }
                g
            }
            DispatchRequest::Weighted { n, edges, .. } => {
                let mut g = Graph::new(*n as usize).expect("bounded by MAX_VERTICES");
                for &(u, v, w) in edges {
                    if let Err(e) = g.add_edge(u as usize, v as usize, w as u32) {
                        log::debug!("dispatch request: skipping edge ({u},{v},{w}): {e}");
                    }
                }
                g
            }
        }
    }
}

fn is_unweighted_form(algorithm_id: i32) -> bool {
    matches!(algorithm_id, 1 | 4 | 5)
}

pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<DispatchRequest, WireError> {
    let algorithm_id = read_i32(reader).await?;
    if !(1..=5).contains(&algorithm_id) {
        return Err(WireError::InvalidAlgorithmId(algorithm_id));
    }

    let n = read_i32(reader).await?;
    if n <= 0 || n > MAX_VERTICES {
        return Err(WireError::InvalidVertexCount(n));
    }

    if is_unweighted_form(algorithm_id) {
        let count = (n * n) as usize;
        let mut adjacency = Vec::with_capacity(count);
        for _ in 0..count {
            adjacency.push(read_i32(reader).await?);
        }
        Ok(DispatchRequest::Unweighted {
            algorithm_id,
            n,
            adjacency,
        })
    } else {
        let num_edges = read_i32(reader).await?;
        let max_edges = n * n;
        if num_edges < 0 || num_edges > max_edges {
            return Err(WireError::InvalidEdgeCount {
                declared: num_edges,
                max: max_edges,
            });
        }
        let mut edges = Vec::with_capacity(num_edges as usize);
        for _ in 0..num_edges {
            let u = read_i32(reader).await?;
            let v = read_i32(reader).await?;
            let w = read_i32(reader).await?;
            if u < 0 || u >= n || v < 0 || v >= n || w <= 0 {
                return Err(WireError::InvalidEdge { u, v, w, n });
            }
            edges.push((u, v, w));
        }
        Ok(DispatchRequest::Weighted {
            algorithm_id,
            n,
            edges,
        })
    }
}

/// `status=1` on success (`text` NUL-terminated), `status=0` on failure (no body).
pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    result: &Result<String, WireError>,
) -> Result<(), WireError> {
    match result {
        Ok(text) => {
            writer.write_all(&1i32.to_ne_bytes()).await?;
            writer.write_all(&(text.len() as i32).to_ne_bytes()).await?;
            writer.write_all(text.as_bytes()).await?;
            writer.write_all(&[0u8]).await?;
        }
        Err(_) => {
            writer.write_all(&0i32.to_ne_bytes()).await?;
            writer.write_all(&0i32.to_ne_bytes()).await?;
        }
    }
    writer.flush().await?;
    Ok(())
}

/// Client-side counterpart of [`read_request`] for algorithm ids 1, 4, 5 (adjacency matrix form).
pub async fn write_unweighted_request<W: AsyncWrite + Unpin>(
    writer: &mut W,
    algorithm_id: i32,
    n: i32,
    adjacency: &[i32],
) -> Result<(), WireError> {
    writer.write_all(&algorithm_id.to_ne_bytes()).await?;
    writer.write_all(&n.to_ne_bytes()).await?;
    for &a in adjacency {
        writer.write_all(&a.to_ne_bytes()).await?;
    }
    writer.flush().await?;
    Ok(())
}

/// Client-side counterpart of [`read_request`] for algorithm ids 2, 3 (edge-list form).
pub async fn write_weighted_request<W: AsyncWrite + Unpin>(
    writer: &mut W,
    algorithm_id: i32,
    n: i32,
    edges: &[(i32, i32, i32)],
) -> Result<(), WireError> {
    writer.write_all(&algorithm_id.to_ne_bytes()).await?;
    writer.write_all(&n.to_ne_bytes()).await?;
    writer.write_all(&(edges.len() as i32).to_ne_bytes()).await?;
    for &(u, v, w) in edges {
        writer.write_all(&u.to_ne_bytes()).await?;
        writer.write_all(&v.to_ne_bytes()).await?;
        writer.write_all(&w.to_ne_bytes()).await?;
    }
    writer.flush().await?;
    Ok(())
}

/// Client-side counterpart of [`write_response`], used by the test client and integration
/// tests to parse a server's reply.
pub async fn read_response<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Option<String>, WireError> {
    let status = read_i32(reader).await?;
    let length = read_i32(reader).await?;
    if status == 0 {
        return Ok(None);
    }
    let mut body = vec![0u8; (length + 1) as usize];
    reader.read_exact(&mut body).await?;
    body.pop(); // trailing NUL
    Ok(Some(String::from_utf8_lossy(&body).into_owned()))
}
