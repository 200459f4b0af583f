/// WGSL Phong shader for every scene draw.
///
/// Group 0 holds the per-frame uniforms and the per-draw uniforms (bound
/// with a dynamic offset); group 1 holds the texture and sampler.
pub const SCENE_SHADER: &str = r#"
struct PointLight {
    position: vec3<f32>,
    constant: f32,
    ambient: vec3<f32>,
    linear: f32,
    diffuse: vec3<f32>,
    quadratic: f32,
    specular: vec3<f32>,
    active: u32,
};

struct Frame {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    view_position: vec3<f32>,
    _pad: f32,
    lights: array<PointLight, 4>,
};

struct Object {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    color: vec4<f32>,
    uv_scale: vec2<f32>,
    use_texture: u32,
    use_lighting: u32,
    diffuse: vec3<f32>,
    shininess: f32,
    specular: vec3<f32>,
    _pad: f32,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

@group(0) @binding(1)
var<uniform> object: Object;

@group(1) @binding(0)
var t_object: texture_2d<f32>;

@group(1) @binding(1)
var s_object: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world = object.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.projection * frame.view * world;
    out.world_position = world.xyz;
    out.world_normal = (object.normal_matrix * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Decoded textures store the bottom row first, so v = 0 is the bottom edge.
    let uv = in.uv * object.uv_scale;
    let texel = textureSample(t_object, s_object, uv);
    let base = select(object.color, texel, object.use_texture != 0u);

    if (object.use_lighting == 0u) {
        return base;
    }

    var normal = normalize(in.world_normal);
    let view_dir = normalize(frame.view_position - in.world_position);
    // Open shapes are seen from both sides.
    if (dot(normal, view_dir) < 0.0) {
        normal = -normal;
    }

    var lit = vec3<f32>(0.0);
    for (var i = 0u; i < 4u; i = i + 1u) {
        let light = frame.lights[i];
        if (light.active == 0u) {
            continue;
        }
        let to_light = light.position - in.world_position;
        let distance = length(to_light);
        let light_dir = to_light / max(distance, 1e-4);
        let attenuation = 1.0 / (light.constant + light.linear * distance
            + light.quadratic * distance * distance);

        let diff = max(dot(normal, light_dir), 0.0);
        let reflected = reflect(-light_dir, normal);
        let spec = pow(max(dot(view_dir, reflected), 0.0), max(object.shininess, 1.0));

        lit += light.ambient * base.rgb;
        lit += light.diffuse * diff * object.diffuse * base.rgb * attenuation;
        lit += light.specular * spec * object.specular * attenuation;
    }

    return vec4<f32>(lit, base.a);
}
"#;
