//! Hero scene graph and its per-frame animator.
//!
//! The scene is a sand plane with a displacement shader, a small cluster of
//! floating stones and a rising particle field. [`SceneAnimator::update`] is
//! called once per frame by whatever [`TickSource`](crate::frame::TickSource)
//! drives the page; the renderer reads the resulting [`Scene`].

use crate::camera::{Camera, Ray};
use crate::clock::{Clock, SceneClock, Tick};
use crate::constants::*;
use crate::error::SceneError;
use crate::uniforms::{UniformBlock, UniformValue};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles (radians), applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

/// Uniform inputs of the sand displacement shader.
#[derive(Clone, Debug, PartialEq)]
pub struct SandMaterial {
    pub time: f32,
    pub color: Vec3,
    pub grid_color: Vec3,
    /// World-space (x, z) of the last pointer hit on the plane.
    pub pointer: Vec2,
    pub resolution: Vec2,
    pub ripple_strength: f32,
}

impl SandMaterial {
    pub const BLOCK: &'static str = "sand";

    pub fn default_block(resolution: Vec2) -> Result<UniformBlock, SceneError> {
        UniformBlock::new(
            Self::BLOCK,
            [
                ("time", UniformValue::Float(0.0)),
                ("color", UniformValue::Vec3(Vec3::from(CLEAR_RGB))),
                ("grid_color", UniformValue::Vec3(Vec3::from(NEON_RGB))),
                ("pointer", UniformValue::Vec2(Vec2::from(POINTER_PARKED))),
                ("resolution", UniformValue::Vec2(resolution)),
                ("ripple_strength", UniformValue::Float(0.0)),
            ],
        )
    }

    pub fn from_block(block: &UniformBlock) -> Result<Self, SceneError> {
        Ok(Self {
            time: block.float("time")?,
            color: block.vec3("color")?,
            grid_color: block.vec3("grid_color")?,
            pointer: block.vec2("pointer")?,
            resolution: block.vec2("resolution")?,
            ripple_strength: block.float("ripple_strength")?,
        })
    }
}

/// Uniform inputs of the particle shader.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleMaterial {
    pub time: f32,
    pub color: Vec3,
    pub pixel_ratio: f32,
    pub size: f32,
}

impl ParticleMaterial {
    pub const BLOCK: &'static str = "particles";

    pub fn default_block(pixel_ratio: f32) -> Result<UniformBlock, SceneError> {
        UniformBlock::new(
            Self::BLOCK,
            [
                ("time", UniformValue::Float(0.0)),
                ("color", UniformValue::Vec3(Vec3::from(NEON_RGB))),
                ("pixel_ratio", UniformValue::Float(pixel_ratio)),
                ("size", UniformValue::Float(PARTICLE_SIZE)),
            ],
        )
    }

    pub fn from_block(block: &UniformBlock) -> Result<Self, SceneError> {
        let size = block.float("size")?;
        if size <= 0.0 {
            return Err(SceneError::InvalidConfig("particle size must be positive"));
        }
        Ok(Self {
            time: block.float("time")?,
            color: block.vec3("color")?,
            pixel_ratio: block.float("pixel_ratio")?,
            size,
        })
    }
}

#[derive(Clone, Debug)]
pub struct GroundPlane {
    pub transform: Transform,
    pub width: f32,
    pub depth: f32,
    pub segments: u32,
    pub material: SandMaterial,
}

impl GroundPlane {
    /// Pointer hit on the flat (undisplaced) plane, limited to its extent.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let hit = ray.intersect_plane_y(self.transform.position.y)?;
        let local = hit - self.transform.position;
        let inside = local.x.abs() <= self.width * 0.5 && local.z.abs() <= self.depth * 0.5;
        inside.then_some(hit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidSpec {
    pub position: Vec3,
    pub scale: f32,
}

#[derive(Clone, Debug)]
pub struct DecorativeSolid {
    pub transform: Transform,
    pub base_y: f32,
    /// Bob angular speed (rad/s).
    pub speed: f32,
    /// Phase offset so neighbours drift out of step.
    pub phase: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub base: Vec3,
    /// Per-particle seed in [0, 1); scales size and offsets the rise cycle.
    pub seed: f32,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub material: ParticleMaterial,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub viewport: Vec2,
    pub pixel_ratio: f32,
    pub solids: SmallVec<[SolidSpec; MAX_SOLIDS]>,
    pub bob_amplitude: f32,
    /// Constant spin of every solid (rad/s around X and Y).
    pub spin_per_sec: Vec2,
    pub camera_follow_rate: f32,
    pub particle_count: usize,
    pub seed: u64,
    pub sand: Option<UniformBlock>,
    pub particles: Option<UniformBlock>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let solids = [
            (Vec3::new(4.0, -1.0, 0.0), 1.5),
            (Vec3::new(6.0, -1.5, 2.0), 1.0),
            (Vec3::new(3.0, -1.8, 2.5), 0.7),
            (Vec3::new(5.0, 0.5, -2.0), 0.5), // floating one
        ]
        .into_iter()
        .map(|(position, scale)| SolidSpec { position, scale })
        .collect();
        Self {
            viewport: Vec2::new(1280.0, 720.0),
            pixel_ratio: 1.0,
            solids,
            bob_amplitude: SOLID_BOB_AMPLITUDE,
            spin_per_sec: Vec2::new(SOLID_SPIN_X_PER_SEC, SOLID_SPIN_Y_PER_SEC),
            camera_follow_rate: CAMERA_FOLLOW_RATE,
            particle_count: PARTICLE_COUNT,
            seed: 42,
            sand: None,
            particles: None,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.viewport.x > 0.0 && self.viewport.y > 0.0) {
            return Err(SceneError::InvalidConfig("viewport must be non-empty"));
        }
        if !(self.pixel_ratio > 0.0) {
            return Err(SceneError::InvalidConfig("pixel ratio must be positive"));
        }
        if self.solids.is_empty() {
            return Err(SceneError::InvalidConfig("at least one decorative solid"));
        }
        if self.solids.len() > MAX_SOLIDS {
            return Err(SceneError::InvalidConfig("too many decorative solids"));
        }
        if !(self.bob_amplitude >= 0.0 && self.bob_amplitude.is_finite()) {
            return Err(SceneError::InvalidConfig("bob amplitude must be finite and >= 0"));
        }
        if !(self.camera_follow_rate >= 0.0 && self.camera_follow_rate.is_finite()) {
            return Err(SceneError::InvalidConfig("camera follow rate must be finite and >= 0"));
        }
        if !self.spin_per_sec.is_finite() {
            return Err(SceneError::InvalidConfig("spin must be finite"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub ground: GroundPlane,
    pub solids: SmallVec<[DecorativeSolid; MAX_SOLIDS]>,
    pub particles: ParticleField,
}

impl Scene {
    pub fn build(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let pixel_ratio = clamp_pixel_ratio(config.pixel_ratio as f64);

        let sand_block = match &config.sand {
            Some(b) => b.clone(),
            None => SandMaterial::default_block(config.viewport)?,
        };
        let particle_block = match &config.particles {
            Some(b) => b.clone(),
            None => ParticleMaterial::default_block(pixel_ratio)?,
        };

        let mut rng = StdRng::seed_from_u64(config.seed);
        let solids = config
            .solids
            .iter()
            .enumerate()
            .map(|(i, spec)| DecorativeSolid {
                transform: Transform {
                    position: spec.position,
                    rotation: Vec3::ZERO,
                    scale: Vec3::splat(spec.scale),
                },
                base_y: spec.position.y,
                speed: SOLID_SPEED_MIN + rng.gen::<f32>() * SOLID_SPEED_SPAN,
                phase: i as f32,
            })
            .collect();

        let particles = (0..config.particle_count)
            .map(|_| {
                let jitter = Vec3::new(rng.gen(), rng.gen(), rng.gen());
                Particle {
                    base: PARTICLE_SPAWN_MIN + jitter * PARTICLE_SPAWN_SIZE,
                    seed: rng.gen(),
                }
            })
            .collect();

        Ok(Self {
            camera: Camera::hero(config.viewport.x / config.viewport.y),
            ground: GroundPlane {
                transform: Transform {
                    position: Vec3::new(0.0, GROUND_Y, 0.0),
                    ..Transform::default()
                },
                width: GROUND_WIDTH,
                depth: GROUND_DEPTH,
                segments: GROUND_SEGMENTS,
                material: SandMaterial::from_block(&sand_block)?,
            },
            solids,
            particles: ParticleField {
                particles,
                material: ParticleMaterial::from_block(&particle_block)?,
            },
        })
    }
}

/// Vertical offset of a bobbing solid; bounded by `amplitude`.
#[inline]
pub fn bob_offset(elapsed: f32, speed: f32, phase: f32, amplitude: f32) -> f32 {
    amplitude * (elapsed * speed + phase).sin()
}

/// Fraction of the remaining distance covered in `dt` seconds of exponential
/// smoothing at `rate` per second.
#[inline]
pub fn smoothing_alpha(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt.max(0.0)).exp()
}

#[inline]
pub fn clamp_pixel_ratio(device_pixel_ratio: f64) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO) as f32
    } else {
        1.0
    }
}

pub struct SceneAnimator<C: Clock> {
    scene: Scene,
    clock: SceneClock<C>,
    pointer_ndc: Vec2,
    bob_amplitude: f32,
    spin_per_sec: Vec2,
    follow_rate: f32,
    last_tick: Tick,
}

impl<C: Clock> SceneAnimator<C> {
    /// Build the scene and start the clock.
    pub fn new(config: &SceneConfig, clock: C) -> Result<Self, SceneError> {
        let scene = Scene::build(config)?;
        log::info!(
            "[scene] built: solids={} particles={} viewport={}x{}",
            scene.solids.len(),
            scene.particles.particles.len(),
            config.viewport.x,
            config.viewport.y
        );
        Ok(Self {
            scene,
            clock: SceneClock::new(clock),
            pointer_ndc: Vec2::ZERO,
            bob_amplitude: config.bob_amplitude,
            spin_per_sec: config.spin_per_sec,
            follow_rate: config.camera_follow_rate,
            last_tick: Tick::default(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn elapsed(&self) -> f32 {
        self.last_tick.elapsed
    }

    pub fn bob_amplitude(&self) -> f32 {
        self.bob_amplitude
    }

    pub fn pointer_ndc(&self) -> Vec2 {
        self.pointer_ndc
    }

    pub fn set_pointer_ndc(&mut self, ndc: Vec2) {
        if ndc.is_finite() {
            self.pointer_ndc = ndc;
        }
    }

    pub fn update(&mut self) -> Tick {
        let tick = self.clock.tick();
        self.last_tick = tick;
        let Tick { elapsed, delta } = tick;

        // Ripple follows the pointer only while it is over the sand.
        let ray = self.scene.camera.ray_from_ndc(self.pointer_ndc);
        if let Some(hit) = self.scene.ground.intersect(&ray) {
            self.scene.ground.material.pointer = Vec2::new(hit.x, hit.z);
        }
        self.scene.ground.material.time = elapsed;
        self.scene.particles.material.time = elapsed;

        for solid in self.scene.solids.iter_mut() {
            let t = &mut solid.transform;
            t.position.y = solid.base_y
                + bob_offset(elapsed, solid.speed, solid.phase, self.bob_amplitude);
            t.rotation.x += self.spin_per_sec.x * delta;
            t.rotation.y += self.spin_per_sec.y * delta;
        }

        let cam = &mut self.scene.camera;
        let alpha = smoothing_alpha(self.follow_rate, delta);
        let goal_x = self.pointer_ndc.x * CAMERA_PARALLAX_X;
        let goal_y = CAMERA_HOME.y + self.pointer_ndc.y * CAMERA_PARALLAX_Y;
        cam.eye.x += (goal_x - cam.eye.x) * alpha;
        cam.eye.y += (goal_y - cam.eye.y) * alpha;
        cam.target = CAMERA_LOOK_AT;

        tick
    }

    /// Match projection and resolution-dependent uniforms to a new viewport.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f64) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        self.scene.camera.set_viewport(width, height);
        self.scene.ground.material.resolution = Vec2::new(width, height);
        self.scene.particles.material.pixel_ratio = clamp_pixel_ratio(device_pixel_ratio);
        log::debug!("[scene] resize {}x{} dpr={}", width, height, device_pixel_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn default_config_builds_four_desynchronised_solids() {
        let scene = Scene::build(&SceneConfig::default()).unwrap();
        assert_eq!(scene.solids.len(), 4);
        assert_eq!(scene.particles.particles.len(), PARTICLE_COUNT);
        let phases: Vec<f32> = scene.solids.iter().map(|s| s.phase).collect();
        assert_eq!(phases, vec![0.0, 1.0, 2.0, 3.0]);
        for s in &scene.solids {
            assert!(s.speed >= SOLID_SPEED_MIN && s.speed < SOLID_SPEED_MIN + SOLID_SPEED_SPAN);
        }
    }

    #[test]
    fn particles_spawn_inside_box() {
        let scene = Scene::build(&SceneConfig::default()).unwrap();
        let max = PARTICLE_SPAWN_MIN + PARTICLE_SPAWN_SIZE;
        for p in &scene.particles.particles {
            assert!(p.base.cmpge(PARTICLE_SPAWN_MIN).all() && p.base.cmple(max).all());
            assert!((0.0..1.0).contains(&p.seed));
        }
    }

    #[test]
    fn same_seed_same_scene() {
        let a = Scene::build(&SceneConfig::default()).unwrap();
        let b = Scene::build(&SceneConfig::default()).unwrap();
        assert_eq!(a.particles.particles, b.particles.particles);
    }

    #[test]
    fn rejects_empty_viewport() {
        let cfg = SceneConfig {
            viewport: Vec2::new(0.0, 720.0),
            ..SceneConfig::default()
        };
        assert!(matches!(
            Scene::build(&cfg),
            Err(SceneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_empty_solid_list() {
        let cfg = SceneConfig {
            solids: SmallVec::new(),
            ..SceneConfig::default()
        };
        assert!(matches!(
            Scene::build(&cfg),
            Err(SceneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn default_ripple_adds_no_extra_gain() {
        let scene = Scene::build(&SceneConfig::default()).unwrap();
        assert_eq!(scene.ground.material.ripple_strength, 0.0);
    }

    #[test]
    fn ground_intersection_respects_extent() {
        let scene = Scene::build(&SceneConfig::default()).unwrap();
        let down = Ray {
            origin: Vec3::new(1.0, 5.0, 1.0),
            dir: Vec3::NEG_Y,
        };
        assert_eq!(
            scene.ground.intersect(&down),
            Some(Vec3::new(1.0, GROUND_Y, 1.0))
        );
        let outside = Ray {
            origin: Vec3::new(40.0, 5.0, 0.0),
            dir: Vec3::NEG_Y,
        };
        assert_eq!(scene.ground.intersect(&outside), None);
    }

    #[test]
    fn resize_updates_aspect_and_resolution() {
        let mut anim = SceneAnimator::new(&SceneConfig::default(), ManualClock::new()).unwrap();
        anim.resize(800.0, 400.0, 3.0);
        let scene = anim.scene();
        assert_eq!(scene.camera.aspect, 2.0);
        assert_eq!(scene.ground.material.resolution, Vec2::new(800.0, 400.0));
        assert_eq!(scene.particles.material.pixel_ratio, 2.0);
        anim.resize(0.0, 400.0, 1.0);
        assert_eq!(anim.scene().camera.aspect, 2.0);
    }
}
