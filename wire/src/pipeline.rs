// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The pipeline front-end's request/response framing (§6, "Pipeline wire protocol").
//!
//! The reference protocol reads the edge payload in a single `recv`, sized by whatever the
//! socket happened to deliver — fragile over TCP, and called out as such in the spec's open
//! questions. We resolve that ambiguity with explicit length-prefixing: the 3-integer header is
//! immediately followed by a 4-byte edge count, then that many `[u, v, w]` triples. The on-wire
//! integer layout itself (native byte order, 4 bytes each) is unchanged.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use graphcore::Graph;

use crate::error::WireError;
use crate::{read_i32, MAX_VERTICES};

#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub seed: i32,
    pub max_weight: i32,
    pub vertices: i32,
    pub edges: Vec<(i32, i32, i32)>,
}

impl PipelineRequest {
    /// Builds the graph this request describes, skipping (and logging) duplicate edges per
    /// §7's "Bad client payload" / "Graph construction error" handling.
    pub fn build_graph(&self) -> Graph {
        let mut g = Graph::new(self.vertices as usize).expect("bounded by MAX_VERTICES");
        for &(u, v, w) in &self.edges {
            if let Err(e) = g.add_edge(u as usize, v as usize, w as u32) {
                log::debug!("pipeline request: skipping edge ({u},{v},{w}): {e}");
            }
        }
        g
    }
}

pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<PipelineRequest, WireError> {
    let seed = read_i32(reader).await?;
    let max_weight = read_i32(reader).await?;
    let vertices = read_i32(reader).await?;
    if vertices <= 0 || vertices > MAX_VERTICES {
        return Err(WireError::InvalidVertexCount(vertices));
    }

    let edge_count = read_i32(reader).await?;
    let max_edges = vertices * vertices;
    if edge_count < 0 || edge_count > max_edges {
        return Err(WireError::InvalidEdgeCount {
            declared: edge_count,
            max: max_edges,
        });
    }

    let mut edges = Vec::with_capacity(edge_count as usize);
    for _ in 0..edge_count {
        let u = read_i32(reader).await?;
        let v = read_i32(reader).await?;
        let w = read_i32(reader).await?;
        if u < 0 || u >= vertices || v < 0 || v >= vertices || w <= 0 {
            return Err(WireError::InvalidEdge {
                u,
                v,
                w,
                n: vertices,
            });
        }
        edges.push((u, v, w));
    }

    Ok(PipelineRequest {
        seed,
        max_weight,
        vertices,
        edges,
    })
}

/// Writes the final report verbatim and lets the caller close the connection, matching the
/// "plain text blob ... followed by connection close" response shape in §6.
pub async fn write_report<W: AsyncWrite + Unpin>(
    writer: &mut W,
    report: &str,
) -> Result<(), WireError> {
    writer.write_all(report.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Client-side counterpart of [`read_request`]: encodes a request in the same length-prefixed
/// framing. Used by the demo client and by this module's own tests.
pub async fn write_request<W: AsyncWrite + Unpin>(
    writer: &mut W,
    seed: i32,
    max_weight: i32,
    vertices: i32,
    edges: &[(i32, i32, i32)],
) -> Result<(), WireError> {
    writer.write_all(&seed.to_ne_bytes()).await?;
    writer.write_all(&max_weight.to_ne_bytes()).await?;
    writer.write_all(&vertices.to_ne_bytes()).await?;
    writer.write_all(&(edges.len() as i32).to_ne_bytes()).await?;
    for &(u, v, w) in edges {
        writer.write_all(&u.to_ne_bytes()).await?;
        writer.write_all(&v.to_ne_bytes()).await?;
        writer.write_all(&w.to_ne_bytes()).await?;
    }
    writer.flush().await?;
    Ok(())
}

/// Client-side counterpart of [`write_report`]: the server closes the connection after writing
/// the report, so the client simply reads until EOF.
pub async fn read_response<R: AsyncRead + Unpin>(reader: &mut R) -> Result<String, WireError> {
    let mut body = Vec::new();
    reader.read_to_end(&mut body).await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    async fn encode_request(seed: i32, max_weight: i32, vertices: i32, edges: &[(i32, i32, i32)]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_request(&mut buf, seed, max_weight, vertices, edges)
            .await
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn round_trips_a_triangle_request() {
        let bytes = encode_request(1, 10, 3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)]).await;
        let mut cursor = Cursor::new(bytes);
        let req = read_request(&mut cursor).await.unwrap();
        assert_eq!(req.vertices, 3);
        assert_eq!(req.edges.len(), 3);
        let g = req.build_graph();
        assert_eq!(g.order(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[tokio::test]
    async fn rejects_out_of_range_vertex_count() {
        let bytes = encode_request(0, 0, 0, &[]).await;
        let mut cursor = Cursor::new(bytes);
        assert!(matches!(
            read_request(&mut cursor).await,
            Err(WireError::InvalidVertexCount(0))
        ));

        let bytes = encode_request(0, 0, 51, &[]).await;
        let mut cursor = Cursor::new(bytes);
        assert!(matches!(
            read_request(&mut cursor).await,
            Err(WireError::InvalidVertexCount(51))
        ));
    }

    #[tokio::test]
    async fn rejects_edge_referencing_out_of_range_vertex() {
        let bytes = encode_request(0, 0, 2, &[(0, 5, 1)]).await;
        let mut cursor = Cursor::new(bytes);
        assert!(matches!(
            read_request(&mut cursor).await,
            Err(WireError::InvalidEdge { .. })
        ));
    }

    #[tokio::test]
    async fn rejects_non_positive_weight() {
        let bytes = encode_request(0, 0, 2, &[(0, 1, 0)]).await;
        let mut cursor = Cursor::new(bytes);
        assert!(matches!(
            read_request(&mut cursor).await,
            Err(WireError::InvalidEdge { .. })
        ));
    }

    #[tokio::test]
    async fn duplicate_edges_are_skipped_not_rejected() {
        let bytes = encode_request(0, 0, 3, &[(0, 1, 2), (0, 1, 5)]).await;
        let mut cursor = Cursor::new(bytes);
        let req = read_request(&mut cursor).await.unwrap();
        let g = req.build_graph();
        assert_eq!(g.get_weight(0, 1), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[tokio::test]
    async fn short_read_is_reported() {
        let bytes = vec![0u8; 4]; // not even a full header
        let mut cursor = Cursor::new(bytes);
        assert!(matches!(
            read_request(&mut cursor).await,
            Err(WireError::ShortRead)
        ));
    }

    #[tokio::test]
    async fn response_reads_the_report_until_eof() {
        let mut buf = Vec::new();
        write_report(&mut buf, "=== PIPELINE PROCESSING RESULTS ===\n")
            .await
            .unwrap();
        let mut cursor = Cursor::new(buf);
        let report = read_response(&mut cursor).await.unwrap();
        assert_eq!(report, "=== PIPELINE PROCESSING RESULTS ===\n");
    }
}
