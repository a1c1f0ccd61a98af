//! Triangle shader pair.
//!
//! The WGSL module draws one triangle without any vertex or index buffer: the
//! vertex stage derives each clip position from `@builtin(vertex_index)` and the
//! fragment stage emits a constant color. The module declares no bindings.
//!
//! `reference` mirrors both stages on the CPU so GPU output can be checked.

mod reference;

pub use reference::{
    fragment_stage, reference_triangle, vertex_stage, ClipTriangle, VertexOutput, FILL_COLOR,
};

/// WGSL source of the shader pair.
pub const TRIANGLE_WGSL: &str = include_str!("triangle.wgsl");

/// Vertex stage entry point.
pub const VS_MAIN: &str = "vs_main";

/// Fragment stage entry point.
pub const FS_MAIN: &str = "fs_main";

/// Vertices dispatched per draw. The vertex stage is only defined for indices below this.
pub const VERTEX_COUNT: u32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(TRIANGLE_WGSL).expect("triangle.wgsl should parse")
    }

    #[test]
    fn wgsl_validates() {
        let module = parse();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        assert!(validator.validate(&module).is_ok());
    }

    #[test]
    fn exposes_exactly_one_vertex_and_one_fragment_entry_point() {
        let module = parse();
        let mut points: Vec<(&str, naga::ShaderStage)> = module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect();
        points.sort_by_key(|(name, _)| *name);

        assert_eq!(
            points,
            vec![
                (FS_MAIN, naga::ShaderStage::Fragment),
                (VS_MAIN, naga::ShaderStage::Vertex),
            ]
        );
    }

    #[test]
    fn declares_no_global_resources() {
        // No uniforms, textures, samplers or push constants.
        assert_eq!(parse().global_variables.len(), 0);
    }
}
