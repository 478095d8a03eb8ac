//! Flat triangle strip connecting two rods.
//!
//! A [`Panel`] unfolds the zig-zag strip `a0, b0, a1, b1, ...` between two
//! rods onto the z = 0 plane. Each new vertex is placed by trilateration
//! so that the triangle it closes has the same side lengths as the 3D
//! triangle it stands for.

use crate::error::{Error, Result};
use crate::geom::{trilaterate, Vector3};
use crate::rod::RodState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A zig-zag triangle strip of `2N` vertices on the z = 0 plane.
///
/// Even vertices come from the first rod, odd vertices from the second.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Panel {
    vertices: Vec<Vector3>,
}

impl Panel {
    /// Lays out the strip between two (typically clipped) rods.
    ///
    /// Both rods are first resampled to the larger of their point counts
    /// `N`. The first two vertices are the origin and `(0, |a0 - b0|, 0)`.
    /// Each later vertex is one of the two trilateration candidates from
    /// the previous two vertices. Past the fourth vertex, the candidate
    /// farther from the vertex three positions back is kept, which stops
    /// the strip folding back over itself in practice; it is a heuristic,
    /// not a guarantee.
    ///
    /// A single-point rod is stretched to `N` copies of its point, and the
    /// strip degenerates to a fan around it.
    ///
    /// # Errors
    ///
    /// [`Error::PanelTriangulation`] when a vertex cannot be placed.
    pub fn build(rod_a: &RodState, rod_b: &RodState) -> Result<Self> {
        let n = rod_a.num_points().max(rod_b.num_points());
        let rod_a = rod_a.rescale(n)?;
        let rod_b = rod_b.rescale(n)?;
        let (a, b) = (rod_a.points(), rod_b.points());

        let mut vertices = Vec::with_capacity(2 * n);
        vertices.push(Vector3::ZERO);
        vertices.push(Vector3::new(0.0, a[0].distance(b[0]), 0.0));

        for i in 2..2 * n {
            let (p1, p2, next) = if i % 2 == 0 {
                (a[(i - 2) / 2], b[(i - 2) / 2], a[i / 2])
            } else {
                (b[(i - 3) / 2], a[(i - 1) / 2], b[(i - 1) / 2])
            };

            // a stretched single-point rod repeats its point: the strip
            // becomes a fan and the vertex stays on the apex
            if next == p1 {
                vertices.push(vertices[i - 2]);
                continue;
            }

            let candidates = trilaterate(
                vertices[i - 2],
                vertices[i - 1],
                next.distance(p1),
                next.distance(p2),
            )
            .map_err(|_| Error::PanelTriangulation { vertex: i })?;

            let chosen = if i > 3 {
                // on a fan v[i-3] is the apex itself, equidistant from both
                let back = if vertices[i - 3] == vertices[i - 1] {
                    vertices[i - 4]
                } else {
                    vertices[i - 3]
                };
                if back.distance(candidates[0]) > back.distance(candidates[1]) {
                    candidates[0]
                } else {
                    candidates[1]
                }
            } else {
                candidates[0]
            };
            vertices.push(chosen);
        }

        log::debug!(
            "panel laid out: {} vertices from rods of {} and {} points",
            vertices.len(),
            rod_a.num_points(),
            rod_b.num_points()
        );

        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Consecutive vertex triples of the strip.
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3; 3]> + '_ {
        self.vertices.windows(3).map(|w| [w[0], w[1], w[2]])
    }

    /// The two flattened rod edges of the strip.
    ///
    /// The first edge is the even vertices, preceded by the first odd
    /// vertex; the second is the odd vertices, followed by the last even
    /// vertex. Drawn together they trace the panel's outline including
    /// both end caps.
    pub fn outline(&self) -> (Vec<Vector3>, Vec<Vector3>) {
        let evens = self.vertices.iter().step_by(2).copied();
        let odds: Vec<Vector3> = self.vertices.iter().skip(1).step_by(2).copied().collect();

        let mut edge_a: Vec<Vector3> = odds.first().copied().into_iter().collect();
        edge_a.extend(evens);

        let mut edge_b = odds;
        if let Some(&last_even) = self.vertices.iter().step_by(2).last() {
            edge_b.push(last_even);
        }

        (edge_a, edge_b)
    }
}
