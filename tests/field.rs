//! Behavior of a particle field driven tick by tick, checked through a
//! surface that records what it is asked to draw.

use portfolio_particles::{
    FieldConfig, FieldError, MarkerStyle, MarkerSurface, ParticleField, ParticleSeed, PixelCanvas,
    Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

struct Marker(usize);

#[derive(Default)]
struct Log {
    created: usize,
    last_positions: Vec<[f64; 2]>,
    released: Vec<usize>,
}

impl MarkerSurface for Log {
    type Marker = Marker;

    fn create_marker(&mut self, _style: MarkerStyle) -> Result<Marker, FieldError> {
        self.created += 1;
        self.last_positions.push([f64::NAN, f64::NAN]);
        Ok(Marker(self.created - 1))
    }

    fn place_marker(&mut self, marker: &Marker, pos: [f64; 2]) {
        self.last_positions[marker.0] = pos;
    }

    fn release_marker(&mut self, marker: Marker) {
        self.released.push(marker.0);
    }
}

// Keeps its release log outside the field so drops can be observed
struct Shared(Rc<RefCell<Vec<usize>>>);

impl MarkerSurface for Shared {
    type Marker = Marker;

    fn create_marker(&mut self, _style: MarkerStyle) -> Result<Marker, FieldError> {
        Ok(Marker(0))
    }

    fn place_marker(&mut self, _marker: &Marker, _pos: [f64; 2]) {}

    fn release_marker(&mut self, marker: Marker) {
        self.0.borrow_mut().push(marker.0);
    }
}

fn field() -> ParticleField<Log> {
    ParticleField::new(Log::default(), FieldConfig::default())
}

fn seed(pos: [f64; 2], vel: [f64; 2]) -> ParticleSeed {
    ParticleSeed::new(pos, vel, 3.0, 0.2)
}

#[test]
fn particles_never_leave_the_viewport() {
    let viewport = Viewport::new(320, 200);
    let mut field = field();
    let mut rng = StdRng::seed_from_u64(42);
    field.start(viewport, &mut rng).unwrap();

    for tick in 0..2_000 {
        // sweep the pointer across the field so repulsion keeps kicking in
        let t = tick as f64;
        field.on_pointer_move((t * 3.7) % 320.0, (t * 1.9) % 200.0);
        field.advance();
        for particle in field.particles() {
            assert!(
                viewport.contains(particle.pos),
                "tick {}: {:?} escaped",
                tick,
                particle.pos
            );
        }
    }
}

#[test]
fn markers_follow_the_particles() {
    let mut field = field();
    let mut rng = StdRng::seed_from_u64(9);
    field.start(Viewport::new(640, 480), &mut rng).unwrap();
    for _ in 0..25 {
        field.advance();
    }
    for (i, particle) in field.particles().iter().enumerate() {
        assert_eq!(field.surface().last_positions[i], particle.pos);
    }
}

#[test]
fn same_seeds_and_pointer_path_give_identical_runs() {
    let seeds: Vec<ParticleSeed> = {
        let mut rng = StdRng::seed_from_u64(2024);
        (0..50)
            .map(|_| ParticleSeed::random(&mut rng, Viewport::new(400, 300)))
            .collect()
    };

    let run = |seeds: Vec<ParticleSeed>| {
        let mut field = field();
        field.start_with(Viewport::new(400, 300), seeds).unwrap();
        for tick in 0..500 {
            let t = tick as f64;
            field.on_pointer_move(200.0 + 150.0 * (t / 40.0).cos(), 150.0 + 100.0 * (t / 40.0).sin());
            field.advance();
        }
        field
            .particles()
            .iter()
            .map(|p| (p.pos, p.vel))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(seeds.clone()), run(seeds));
}

#[test]
fn wall_bounce_negates_velocity_exactly_once() {
    let mut field = field();
    field.on_pointer_move(1000.0, 1000.0);
    field
        .start_with(Viewport::new(200, 200), vec![seed([0.0, 100.0], [-0.5, 0.0])])
        .unwrap();
    field.advance();
    let particle = &field.particles()[0];
    assert_eq!(particle.vel[0], 0.5);
    assert_eq!(particle.pos[0], 0.0);
}

#[test]
fn repulsion_starts_just_inside_one_hundred_pixels() {
    let viewport = Viewport::new(400, 400);

    let mut inside = field();
    inside.on_pointer_move(199.9, 100.0);
    inside.start_with(viewport, vec![seed([100.0, 100.0], [0.0, 0.0])]).unwrap();
    inside.advance();
    assert_ne!(inside.particles()[0].vel, [0.0, 0.0]);

    let mut outside = field();
    outside.on_pointer_move(200.1, 100.0);
    outside.start_with(viewport, vec![seed([100.0, 100.0], [0.0, 0.0])]).unwrap();
    outside.advance();
    assert_eq!(outside.particles()[0].vel, [0.0, 0.0]);
}

#[test]
fn particle_under_the_pointer_is_pushed_towards_negative_x() {
    let mut field = field();
    field.on_pointer_move(100.0, 100.0);
    field
        .start_with(Viewport::new(200, 200), vec![seed([100.0, 100.0], [0.0, 0.0])])
        .unwrap();
    field.advance();
    assert_eq!(field.particles()[0].vel, [-0.1, 0.0]);
}

#[test]
fn speed_limit_caps_accumulated_repulsion() {
    let config = FieldConfig::default().with_max_speed(Some(0.25));
    let mut field = ParticleField::new(Log::default(), config);
    field.on_pointer_move(100.0, 100.0);
    field
        .start_with(Viewport::new(200, 200), vec![seed([100.0, 100.0], [0.0, 0.0])])
        .unwrap();
    for _ in 0..20 {
        field.advance();
    }
    let vel = field.particles()[0].vel;
    assert!((vel[0] * vel[0] + vel[1] * vel[1]).sqrt() <= 0.25 + 1e-12);
}

#[test]
fn empty_field_starts_and_ticks_without_markers() {
    let mut field = ParticleField::new(Log::default(), FieldConfig::default().with_particle_count(0));
    let mut rng = StdRng::seed_from_u64(0);
    field.start(Viewport::new(100, 100), &mut rng).unwrap();
    field.advance();
    assert!(field.is_running());
    assert!(field.particles().is_empty());
    assert_eq!(field.surface().created, 0);
    assert_eq!(field.stop(), 0);
}

#[test]
fn zero_area_viewport_pins_particles_to_the_origin() {
    let mut field = ParticleField::new(Log::default(), FieldConfig::default().with_particle_count(5));
    field.on_pointer_move(500.0, 500.0);
    let mut rng = StdRng::seed_from_u64(3);
    field.start(Viewport::new(0, 0), &mut rng).unwrap();
    for _ in 0..10 {
        field.advance();
    }
    for particle in field.particles() {
        assert_eq!(particle.pos, [0.0, 0.0]);
    }
}

#[test]
fn stop_releases_each_marker_once() {
    let mut field = ParticleField::new(Log::default(), FieldConfig::default().with_particle_count(6));
    let mut rng = StdRng::seed_from_u64(8);
    field.start(Viewport::new(300, 300), &mut rng).unwrap();
    field.advance();

    assert_eq!(field.stop(), 6);
    assert_eq!(field.stop(), 0);
    let mut released = field.surface().released.clone();
    released.sort();
    assert_eq!(released, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn dropping_a_running_field_releases_its_markers() {
    let released = Rc::new(RefCell::new(Vec::new()));
    {
        let mut field = ParticleField::new(
            Shared(Rc::clone(&released)),
            FieldConfig::default().with_particle_count(3),
        );
        let mut rng = StdRng::seed_from_u64(12);
        field.start(Viewport::new(50, 50), &mut rng).unwrap();
        field.advance();
    }
    assert_eq!(released.borrow().len(), 3);
}

#[test]
fn pixel_canvas_draws_a_running_field() {
    let mut field = ParticleField::new(PixelCanvas::new(120, 80), FieldConfig::default());
    field.on_pointer_move(-500.0, -500.0);
    field
        .start_with(
            Viewport::new(120, 80),
            vec![seed([30.0, 30.0], [1.0, 0.5]), seed([90.0, 60.0], [-0.5, 0.0])],
        )
        .unwrap();
    field.advance();
    assert_eq!(field.surface().live_dots(), 2);

    field.surface_mut().draw();
    let lit = |x: i32, y: i32| field.surface().pixel(x, y).map(|c| c.a > 0).unwrap_or(false);
    assert!(lit(31, 30));
    assert!(lit(89, 60));
    assert!(!lit(60, 10));

    field.stop();
    assert_eq!(field.surface().live_dots(), 0);
}
