/// WGSL Phong shader for scene objects, lit by a single point or directional light.
///
/// Falloff follows `1 / (1 + d² / size)`. Normals come from the per-instance
/// normal matrix; degenerate (flattened) normals fall back to +Z.
pub const SCENE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
    light_position: vec4<f32>,
    // rgb = color, a = size
    light_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) normal_0: vec4<f32>,
    @location(7) normal_1: vec4<f32>,
    @location(8) normal_2: vec4<f32>,
    @location(9) color: vec4<f32>,
    // ambient, diffusivity, specularity, smoothness
    @location(10) coefficients: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) coefficients: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let normal_matrix = mat3x3<f32>(
        instance.normal_0.xyz,
        instance.normal_1.xyz,
        instance.normal_2.xyz,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = normal_matrix * vertex.normal;
    out.color = instance.color;
    out.coefficients = instance.coefficients;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let ambient = in.coefficients.x;
    let diffusivity = in.coefficients.y;
    let specularity = in.coefficients.z;
    let smoothness = in.coefficients.w;

    let n_len = length(in.world_normal);
    let n = select(vec3<f32>(0.0, 0.0, 1.0), in.world_normal / n_len, n_len > 1e-6);

    let light = uniforms.light_position;
    let to_light_raw = light.xyz - light.w * in.world_position;
    let distance = length(to_light_raw);
    let l = to_light_raw / max(distance, 1e-6);
    let v = normalize(uniforms.camera_position.xyz - in.world_position);
    let h = normalize(l + v);

    let diffuse = max(dot(n, l), 0.0);
    let specular = pow(max(dot(n, h), 0.0), smoothness);
    let size = max(uniforms.light_color.a, 1e-6);
    let attenuation = 1.0 / (1.0 + distance * distance / size);

    let light_rgb = uniforms.light_color.rgb;
    let lit = in.color.rgb * light_rgb * diffusivity * diffuse + light_rgb * specularity * specular;
    let rgb = in.color.rgb * ambient + attenuation * lit;
    return vec4<f32>(min(rgb, vec3<f32>(1.0)), in.color.a);
}
"#;
