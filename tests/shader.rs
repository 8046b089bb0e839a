//! Validation of the viewer's particle shader and the row layout it reads.

use particle_forms::GpuParticle;

const SHADER_SOURCE: &str = include_str!("../src/shader.wgsl");

/// Validates WGSL code using naga.
fn validate_wgsl(code: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(code)
        .map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(module)
}

// ============================================================================
// Shader
// ============================================================================

#[test]
fn test_particle_shader_validates() {
    if let Err(e) = validate_wgsl(SHADER_SOURCE) {
        panic!("{}", e);
    }
}

#[test]
fn test_particle_shader_entry_points() {
    let module = validate_wgsl(SHADER_SOURCE).unwrap();
    let names: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}

#[test]
fn test_uniform_block_size() {
    let module = validate_wgsl(SHADER_SOURCE).unwrap();
    let span = module
        .types
        .iter()
        .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
            (Some(name), naga::TypeInner::Struct { span, .. }) if name == "Uniforms" => Some(*span),
            _ => None,
        })
        .expect("Uniforms struct");

    // mat4x4 + time + point_scale, padded to 16 bytes
    assert_eq!(span, 80);
}

// ============================================================================
// Row Layout
// ============================================================================

#[test]
fn test_gpu_row_layout() {
    assert_eq!(std::mem::size_of::<GpuParticle>(), 32);
    assert_eq!(std::mem::offset_of!(GpuParticle, position), 0);
    assert_eq!(std::mem::offset_of!(GpuParticle, size), 12);
    assert_eq!(std::mem::offset_of!(GpuParticle, color), 16);
}
