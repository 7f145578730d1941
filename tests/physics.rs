use bouncebox::core::DEFAULT_PALETTE;
use bouncebox::{Container, Particle, Result};
use rand::{rngs::StdRng, SeedableRng};

fn particle(radius: f64, center: [f64; 2], velocity: [f64; 2]) -> Result<Particle> {
    Particle::new(radius, 1.0, center, velocity, DEFAULT_PALETTE[0])
}

/// Away from the walls a tick is exactly `center += floor(v * dt)`, `v += a`.
#[test]
fn free_flight_matches_update_rule() -> Result<()> {
    let mut c = Container::with_particles(
        400,
        400,
        [0.25, -0.5],
        vec![
            particle(10.0, [200.0, 200.0], [3.7, -2.2])?,
            particle(12.0, [100.0, 300.0], [-1.5, 4.0])?,
        ],
    )?;
    for fps in [60, 90, 144] {
        let before = c.particles().to_vec();
        c.update(fps)?;
        let dt = 60.0 / f64::from(fps);
        for (b, a) in before.iter().zip(c.particles()) {
            for k in 0..2 {
                assert_eq!(a.center[k], b.center[k] + (b.velocity[k] * dt).floor());
                assert_eq!(a.velocity[k], b.velocity[k] + b.acceleration[k]);
            }
        }
    }
    Ok(())
}

/// A particle touching the left wall and moving left is reflected.
#[test]
fn touching_left_wall_reflects() -> Result<()> {
    let mut c = Container::with_particles(
        200,
        200,
        [0.0, 0.0],
        vec![particle(10.0, [10.0, 100.0], [-4.0, 0.0])?],
    )?;
    c.update(60)?;
    assert!(c.particles()[0].velocity[0] > 0.0);
    assert_eq!(c.particles()[0].velocity[0], 4.0);
    Ok(())
}

#[test]
fn bounds_check_is_center_interval() -> Result<()> {
    let c = Container::new(300, 150, [0.0, 0.0])?;
    let r = 15.0;
    for (x, y, inside) in [
        (15.0, 15.0, true),
        (285.0, 135.0, true),
        (14.0, 50.0, false),
        (286.0, 50.0, false),
        (100.0, 14.0, false),
        (100.0, 136.0, false),
    ] {
        assert_eq!(c.check_in_bounds(&particle(r, [x, y], [0.0, 0.0])?), inside, "({x}, {y})");
    }
    Ok(())
}

#[test]
fn narrow_container_is_rejected() {
    assert!(Container::new(50, 200, [0.0, 0.0]).is_err());
}

#[test]
fn random_scene_always_fits() -> Result<()> {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut c = Container::new(200, 200, [0.0, 0.0])?;
        c.add_random_particle(5, &mut rng);
        assert_eq!(c.len(), 5);
        assert!(c.particles().iter().all(|p| c.check_in_bounds(p)));
    }
    Ok(())
}

/// Nothing moves when there is no velocity and no acceleration.
#[test]
fn resting_scene_is_stationary() -> Result<()> {
    let mut c = Container::with_particles(
        200,
        200,
        [0.0, 0.0],
        vec![
            particle(10.0, [50.0, 50.0], [0.0, 0.0])?,
            particle(20.0, [150.0, 120.0], [0.0, 0.0])?,
        ],
    )?;
    let start: Vec<[f64; 2]> = c.particles().iter().map(|p| p.center).collect();
    for _ in 0..500 {
        c.update(144)?;
    }
    let end: Vec<[f64; 2]> = c.particles().iter().map(|p| p.center).collect();
    assert_eq!(start, end);
    Ok(())
}

/// Without acceleration, wall bounces keep speed magnitudes.
#[test]
fn wall_bounces_preserve_speed() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(99);
    let mut c = Container::new(250, 180, [0.0, 0.0])?;
    c.add_random_particle(6, &mut rng);
    let e0 = c.kinetic_energy();
    for _ in 0..300 {
        c.update(60)?;
    }
    assert!((c.kinetic_energy() - e0).abs() < 1e-9);
    Ok(())
}
