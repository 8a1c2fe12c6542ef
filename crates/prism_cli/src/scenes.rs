//! Demo scene catalogue.
//!
//! Every scene except `water_drop` sits inside a 10 x 6 x 10 box of coloured
//! walls centred on the default camera.

use anyhow::{bail, Context, Result};
use prism_core::load_obj;
use prism_math::Vec3;
use prism_tracer::{Color, Material, Object, Octree, OctreeConfig, Plane, PointLight, Scene, Sphere, SpotLight};
use std::path::PathBuf;

/// Names accepted on the command line.
pub const SCENE_NAMES: &[&str] = &["box", "mirror_spheres", "glass_spheres", "reflections", "water_drop", "mesh"];

/// Options that only some scenes use.
#[derive(Debug, Clone, Default)]
pub struct SceneOptions {
    /// OBJ file for the `mesh` scene
    pub mesh: Option<PathBuf>,
    /// Light the mesh with two spot lights instead of one point light
    pub spot: bool,
    pub octree: OctreeConfig,
}

/// Wall colours for [`add_box`].
pub struct BoxColors {
    pub left: Color,
    pub right: Color,
    pub back: Color,
    pub top: Color,
    pub bottom: Color,
}

impl Default for BoxColors {
    fn default() -> Self {
        Self {
            left: Color::new(1.0, 0.0, 0.0),
            right: Color::new(0.0, 1.0, 0.0),
            back: Color::ONE,
            top: Color::ONE,
            bottom: Color::ONE,
        }
    }
}

/// Populate `scene` with the named demo.
pub fn build(name: &str, scene: &mut Scene, options: &SceneOptions) -> Result<()> {
    match name {
        "box" => add_box(scene, &BoxColors::default()),
        "mirror_spheres" => mirror_spheres(scene)?,
        "glass_spheres" => glass_spheres(scene)?,
        "reflections" => reflections(scene)?,
        "water_drop" => water_drop(scene)?,
        "mesh" => mesh(scene, options)?,
        other => bail!("unknown scene '{}', expected one of: {}", other, SCENE_NAMES.join(", ")),
    }

    log::info!(
        "Scene '{}': {} objects, {} lights",
        name,
        scene.objects().len(),
        scene.lights().len()
    );
    Ok(())
}

/// Six inward-facing walls.
pub fn add_box(scene: &mut Scene, colors: &BoxColors) {
    let wall = |point: Vec3, normal: Vec3, color: Color| {
        Box::new(Plane::new(point, normal, Material::matte(color))) as Box<dyn Object>
    };

    scene.add_objects(vec![
        wall(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X, colors.right),
        wall(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, colors.left),
        wall(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, colors.top),
        wall(Vec3::new(0.0, -3.0, 0.0), Vec3::Y, colors.bottom),
        wall(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, colors.back),
        wall(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, colors.back),
    ]);
}

fn light(origin: Vec3, intensity: f32) -> Result<PointLight> {
    Ok(PointLight::new(origin, intensity, Color::ONE)?)
}

fn chrome() -> Result<Material> {
    let silver = Color::splat(0.95);
    Ok(Material::builder()
        .color(silver)
        .specular_color(silver)
        .diffuse(0.0)
        .reflectivity(1.0)
        .specular(1.0, 512.0)
        .build()?)
}

fn glass(ior: f32) -> Result<Material> {
    Ok(Material::builder().diffuse(0.0).refractive(1.0, ior).build()?)
}

fn mirror_spheres(scene: &mut Scene) -> Result<()> {
    add_box(scene, &BoxColors::default());

    scene.add_object(Sphere::new(Vec3::new(-1.5, -1.5, -3.0), 1.2, chrome()?));
    scene.add_object(Sphere::new(Vec3::new(1.5, -1.5, -3.5), 1.0, chrome()?));

    let gold_color = Color::new(1.0, 0.84, 0.0);
    let gold = Material::builder()
        .color(gold_color)
        .specular_color(gold_color)
        .diffuse(0.15)
        .reflectivity(0.85)
        .specular(1.0, 256.0)
        .build()?;
    scene.add_object(Sphere::new(Vec3::new(0.0, 1.0, -4.0), 0.5, gold));

    scene.add_light(light(Vec3::new(0.0, 2.5, -1.0), 1.2)?);
    Ok(())
}

fn glass_spheres(scene: &mut Scene) -> Result<()> {
    add_box(scene, &BoxColors::default());

    // Glass, diamond, water
    scene.add_object(Sphere::new(Vec3::new(-2.0, -1.5, -3.0), 1.0, glass(1.5)?));
    scene.add_object(Sphere::new(Vec3::new(0.0, -1.5, -3.5), 1.0, glass(2.4)?));
    scene.add_object(Sphere::new(Vec3::new(2.0, -1.5, -3.0), 1.0, glass(1.33)?));

    scene.add_light(light(Vec3::new(0.0, 2.5, -1.0), 1.2)?);
    scene.add_light(light(Vec3::new(-2.0, 1.0, 0.0), 0.4)?);
    Ok(())
}

fn reflections(scene: &mut Scene) -> Result<()> {
    add_box(scene, &BoxColors::default());

    scene.add_object(Sphere::new(Vec3::new(0.0, -0.5, -3.0), 1.5, chrome()?));

    // Plastic spheres in a ring around the mirror
    let colors = [
        Color::new(0.9, 0.1, 0.1),
        Color::new(0.1, 0.8, 0.1),
        Color::new(0.1, 0.2, 0.9),
        Color::new(0.95, 0.9, 0.1),
        Color::new(0.85, 0.1, 0.85),
        Color::new(0.1, 0.85, 0.85),
    ];
    for (i, color) in colors.into_iter().enumerate() {
        let angle = i as f32 * std::f32::consts::FRAC_PI_3;
        let center = Vec3::new(2.5 * angle.cos(), -2.0, -3.0 + 2.5 * angle.sin());
        let plastic = Material::builder().color(color).diffuse(0.7).specular(0.6, 64.0).build()?;
        scene.add_object(Sphere::new(center, 0.4, plastic));
    }

    scene.add_light(light(Vec3::new(0.0, 2.5, -1.0), 1.0)?);
    scene.add_light(light(Vec3::ZERO, 0.25)?);
    Ok(())
}

fn water_drop(scene: &mut Scene) -> Result<()> {
    let wall = Material::matte(Color::splat(0.9));
    let sky = Material::matte(Color::new(0.5, 0.7, 1.0));
    let floor = Material::builder()
        .color(Color::new(0.2, 0.2, 0.3))
        .diffuse(0.3)
        .reflectivity(0.7)
        .build()?;

    scene.add_object(Plane::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X, wall.clone()));
    scene.add_object(Plane::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, wall.clone()));
    scene.add_object(Plane::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, sky));
    scene.add_object(Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y, floor));
    scene.add_object(Plane::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, wall.clone()));
    scene.add_object(Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, wall));

    scene.add_object(Sphere::new(Vec3::new(0.0, -0.5, -3.0), 1.5, glass(1.33)?));

    scene.add_light(light(Vec3::new(2.0, 2.5, -1.0), 1.2)?);
    scene.add_light(light(Vec3::new(-1.0, 1.0, 0.0), 0.3)?);
    Ok(())
}

fn mesh(scene: &mut Scene, options: &SceneOptions) -> Result<()> {
    let Some(path) = &options.mesh else {
        bail!("the 'mesh' scene needs --mesh <model.obj>");
    };

    let colors = BoxColors {
        left: Color::new(1.0, 0.0, 0.0),
        right: Color::new(0.0, 0.0, 1.0),
        back: Color::new(0.0, 1.0, 0.0),
        top: Color::new(0.5, 0.0, 0.5),
        bottom: Color::new(1.0, 1.0, 0.0),
    };
    add_box(scene, &colors);

    let mut model = load_obj(path).with_context(|| format!("Failed to load mesh {}", path.display()))?;
    model.scale(10.0);
    model.translate(Vec3::new(0.0, -1.0, -2.5));

    let octree = Octree::with_config(&model, glass(1.5)?, options.octree);
    log::info!(
        "Octree built: {} triangles in {} cells",
        octree.triangle_count(),
        octree.cell_count()
    );
    scene.add_object(octree);

    if options.spot {
        let target = Vec3::new(0.0, -0.5, -2.5);
        let warm = Color::new(1.0, 0.9, 0.85);
        for origin in [Vec3::new(-1.5, 1.0, -1.0), Vec3::new(1.5, 1.0, -1.0)] {
            scene.add_light(SpotLight::new(
                origin,
                target - origin,
                25f32.to_radians(),
                2.0,
                warm,
                Some(35f32.to_radians()),
            )?);
        }
    } else {
        scene.add_light(light(Vec3::new(0.0, 2.0, -2.5), 1.5)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenes_build() {
        for name in SCENE_NAMES.iter().filter(|n| **n != "mesh") {
            let mut scene = Scene::new();
            build(name, &mut scene, &SceneOptions::default()).unwrap();
            assert!(!scene.objects().is_empty(), "{} has no objects", name);
            assert!(!scene.lights().is_empty() || *name == "box", "{} has no lights", name);
        }
    }

    #[test]
    fn test_unknown_scene() {
        let mut scene = Scene::new();
        let err = build("teapot", &mut scene, &SceneOptions::default()).unwrap_err();
        assert!(err.to_string().contains("unknown scene"));
    }

    #[test]
    fn test_mesh_scene_requires_path() {
        let mut scene = Scene::new();
        assert!(build("mesh", &mut scene, &SceneOptions::default()).is_err());
    }

    #[test]
    fn test_box_has_six_walls() {
        let mut scene = Scene::new();
        add_box(&mut scene, &BoxColors::default());
        assert_eq!(scene.objects().len(), 6);
    }
}
