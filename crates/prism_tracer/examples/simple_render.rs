//! Simple ray tracer example.
//!
//! Renders a glass sphere and a mirror sphere on a grey floor and
//! saves the result as a PNG.

use prism_tracer::{Camera, Color, Material, Plane, PointLight, RenderConfig, Renderer, Scene, Sphere, SpotLight, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Prism Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(60.0, Vec3::new(0.0, 1.0, 4.0), Vec3::new(0.0, 0.5, -1.0), 800, 450);
    let config = RenderConfig::default().with_resolution(800, 450).with_quality(4, 5);

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples
    );

    let mut renderer = Renderer::new(camera, config)?;
    let start = std::time::Instant::now();
    renderer.render(&scene);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    renderer.output().save(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Result<Scene, Box<dyn std::error::Error>> {
    let mut scene = Scene::new();

    // Floor
    scene.add_object(Plane::new(
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::Y,
        Material::matte(Color::new(0.5, 0.5, 0.5)),
    ));

    // Glass, mirror and plastic spheres
    let glass = Material::builder().diffuse(0.0).refractive(1.0, 1.5).build()?;
    scene.add_object(Sphere::new(Vec3::new(-1.2, 0.5, -1.0), 1.0, glass));

    let mirror = Material::builder().diffuse(0.0).reflectivity(1.0).build()?;
    scene.add_object(Sphere::new(Vec3::new(1.2, 0.5, -1.5), 1.0, mirror));

    let plastic = Material::builder()
        .color(Color::new(0.8, 0.2, 0.1))
        .specular(0.6, 64.0)
        .build()?;
    scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 0.5, plastic));

    scene.add_light(PointLight::new(Vec3::new(0.0, 4.0, 1.0), 1.0, Color::ONE)?);
    scene.add_light(SpotLight::new(
        Vec3::new(3.0, 3.0, 0.0),
        Vec3::new(-1.0, -1.0, -1.0),
        0.4,
        0.8,
        Color::new(1.0, 0.9, 0.7),
        None,
    )?);

    println!("Created {} objects", scene.objects().len());
    Ok(scene)
}
