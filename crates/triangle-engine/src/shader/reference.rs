use crate::color::Color;

/// Color written by the fragment stage for every covered pixel.
pub const FILL_COLOR: Color = Color::new(0.3, 0.2, 0.1, 1.0);

/// Output of one vertex stage invocation.
///
/// Invariant: `clip_position[2..]` is always `[0.0, 1.0]`, so the triangle sits on
/// the near plane and perspective division is a no-op.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexOutput {
    pub clip_position: [f32; 4],
}

/// CPU twin of `vs_main`.
///
/// Only indices `0..VERTEX_COUNT` are meaningful. Integer math wraps like it does
/// on the GPU, so other indices produce a value instead of a panic.
pub fn vertex_stage(vertex_index: u32) -> VertexOutput {
    let i = vertex_index as i32;
    let x = 1i32.wrapping_sub(i) as f32 * 0.5;
    let y = ((vertex_index & 1) as i32 * 2 - 1) as f32 * 0.5;

    VertexOutput {
        clip_position: [x, y, 0.0, 1.0],
    }
}

/// CPU twin of `fs_main`. The interpolated input is ignored.
pub fn fragment_stage(_input: &VertexOutput) -> Color {
    FILL_COLOR
}

/// The triangle produced by running the vertex stage over indices 0, 1, 2.
pub fn reference_triangle() -> ClipTriangle {
    ClipTriangle {
        vertices: [vertex_stage(0), vertex_stage(1), vertex_stage(2)],
    }
}

/// Three clip-space vertices in draw order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipTriangle {
    pub vertices: [VertexOutput; 3],
}

impl ClipTriangle {
    /// Vertex positions after perspective division.
    pub fn ndc(&self) -> [[f32; 2]; 3] {
        self.vertices.map(|v| {
            let [x, y, _, w] = v.clip_position;
            [x / w, y / w]
        })
    }

    /// Twice the signed area in NDC. Positive means counter-clockwise (Y up).
    pub fn signed_area2(&self) -> f32 {
        let [a, b, c] = self.ndc();
        edge(a, b, c)
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area2() > 0.0
    }

    /// Whether the NDC point `(x, y)` lies inside the triangle, edges included.
    pub fn covers(&self, x: f32, y: f32) -> bool {
        let [a, b, c] = self.ndc();
        let p = [x, y];
        let e0 = edge(a, b, p);
        let e1 = edge(b, c, p);
        let e2 = edge(c, a, p);

        (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0)
    }
}

#[inline]
fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── vertex stage ──────────────────────────────────────────────────────

    #[test]
    fn vertex_zero_is_bottom_right() {
        assert_eq!(vertex_stage(0).clip_position, [0.5, -0.5, 0.0, 1.0]);
    }

    #[test]
    fn vertex_one_is_top_center() {
        assert_eq!(vertex_stage(1).clip_position, [0.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn vertex_two_is_bottom_left() {
        assert_eq!(vertex_stage(2).clip_position, [-0.5, -0.5, 0.0, 1.0]);
    }

    #[test]
    fn vertex_stage_is_idempotent() {
        for i in 0..3 {
            assert_eq!(vertex_stage(i), vertex_stage(i));
        }
    }

    #[test]
    fn depth_and_w_are_fixed() {
        for i in 0..3 {
            let [_, _, z, w] = vertex_stage(i).clip_position;
            assert_eq!((z, w), (0.0, 1.0));
        }
    }

    #[test]
    fn out_of_range_index_does_not_panic() {
        let _ = vertex_stage(u32::MAX);
        let _ = vertex_stage(i32::MAX as u32 + 1);
    }

    // ── fragment stage ────────────────────────────────────────────────────

    #[test]
    fn fragment_color_is_constant() {
        let inputs = [
            vertex_stage(0),
            VertexOutput { clip_position: [12.0, -3.0, 0.5, 2.0] },
            VertexOutput { clip_position: [0.0; 4] },
        ];
        for input in &inputs {
            assert_eq!(fragment_stage(input), Color::new(0.3, 0.2, 0.1, 1.0));
        }
    }

    // ── triangle ──────────────────────────────────────────────────────────

    #[test]
    fn reference_triangle_is_counter_clockwise() {
        // Survives `FrontFace::Ccw` + `Face::Back` culling.
        assert!(reference_triangle().is_counter_clockwise());
    }

    #[test]
    fn vertices_are_distinct() {
        let [a, b, c] = reference_triangle().ndc();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn covers_interior_and_edges() {
        let tri = reference_triangle();
        assert!(tri.covers(0.0, 0.0));
        assert!(tri.covers(0.0, -0.5));
        assert!(tri.covers(0.0, 0.5));
    }

    #[test]
    fn does_not_cover_outside() {
        let tri = reference_triangle();
        assert!(!tri.covers(-0.9, 0.9));
        assert!(!tri.covers(0.9, 0.9));
        assert!(!tri.covers(0.0, -0.6));
        assert!(!tri.covers(0.4, 0.4));
    }

    #[test]
    fn covers_is_winding_agnostic() {
        let mut tri = reference_triangle();
        tri.vertices.swap(0, 2);
        assert!(!tri.is_counter_clockwise());
        assert!(tri.covers(0.0, 0.0));
        assert!(!tri.covers(0.9, 0.9));
    }
}
