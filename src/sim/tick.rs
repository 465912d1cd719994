//! Per-frame simulation step
//!
//! One tick per animation frame with a unit timestep. Behaviour is tied to
//! the host's frame cadence; there is no fixed-rate accumulator.

use glam::Vec2;

use super::boundary::resolve_boundary;
use super::collision::resolve_collisions;
use super::state::{Body, Bound, Table};
use crate::consts::DAMPING;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Bodies reflected off a wall
    pub wall_bounces: u64,
    /// Pair contacts resolved (a pair may be counted from both sides)
    pub collisions: u64,
    /// Overlaps skipped because the centers coincide
    pub coincident: u64,
    /// Bodies whose non-finite position or velocity was reset
    pub isolated: u64,
}

impl TickReport {
    /// Accumulate another report into this one. Totals saturate.
    pub fn merge(&mut self, other: &TickReport) {
        self.wall_bounces = self.wall_bounces.saturating_add(other.wall_bounces);
        self.collisions = self.collisions.saturating_add(other.collisions);
        self.coincident = self.coincident.saturating_add(other.coincident);
        self.isolated = self.isolated.saturating_add(other.isolated);
    }
}

/// Advance every body by one frame.
///
/// For each body in table order: bounce off walls, resolve contacts against
/// all other bodies, move by velocity, then damp velocity.
pub fn tick(table: &mut Table) -> TickReport {
    let mut report = TickReport::default();
    let bound = table.bound;
    let bodies = table.bodies_mut();

    for index in 0..bodies.len() {
        if sanitize(&mut bodies[index], bound) {
            log::warn!(
                "Body {} had non-finite state, reset to rest",
                bodies[index].id.0
            );
            report.isolated += 1;
        }

        if resolve_boundary(&mut bodies[index], bound) {
            report.wall_bounces += 1;
        }

        let contacts = resolve_collisions(bodies, index);
        report.collisions += u64::from(contacts.resolved);
        report.coincident += u64::from(contacts.coincident);

        let body = &mut bodies[index];
        body.pos += body.vel;
        body.vel *= DAMPING;
    }

    table.time_ticks += 1;
    report
}

/// Put a body with non-finite state back at rest. A lost position moves to
/// the middle of the surface. Returns true if anything was reset.
fn sanitize(body: &mut Body, bound: Bound) -> bool {
    let mut reset = false;
    if !body.pos.is_finite() {
        body.pos = Vec2::new(bound.width, bound.height) * 0.5;
        body.vel = Vec2::ZERO;
        reset = true;
    }
    if !body.vel.is_finite() {
        body.vel = Vec2::ZERO;
        reset = true;
    }
    reset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BodyId, Bound, Color};
    use proptest::prelude::*;

    fn table_with(bodies: &[(Vec2, f32, Vec2)]) -> Table {
        let mut table = Table::new(Bound::new(800.0, 400.0));
        for &(pos, radius, vel) in bodies {
            let id = table.add_body(pos, radius, Color::Red);
            table.set_velocity(id, vel);
        }
        table
    }

    #[test]
    fn test_free_flight_moves_then_damps() {
        let mut table = table_with(&[(Vec2::new(400.0, 200.0), 20.0, Vec2::new(3.0, -4.0))]);

        let report = tick(&mut table);
        assert_eq!(report, TickReport::default());
        assert_eq!(table.time_ticks, 1);

        let body = table.get(BodyId(0)).unwrap();
        assert_eq!(body.pos, Vec2::new(403.0, 196.0));
        assert!((body.vel - Vec2::new(2.97, -3.96)).length() < 1e-5);
    }

    #[test]
    fn test_resting_table_stays_put() {
        let mut table = table_with(&[
            (Vec2::new(100.0, 120.0), 20.0, Vec2::ZERO),
            (Vec2::new(230.0, 190.0), 25.0, Vec2::ZERO),
        ]);

        for _ in 0..100 {
            tick(&mut table);
        }
        assert_eq!(table.get(BodyId(0)).unwrap().pos, Vec2::new(100.0, 120.0));
        assert_eq!(table.get(BodyId(1)).unwrap().pos, Vec2::new(230.0, 190.0));
    }

    #[test]
    fn test_wall_bounce_in_tick() {
        let mut table = table_with(&[(Vec2::new(15.0, 200.0), 20.0, Vec2::new(-3.0, 0.0))]);

        let report = tick(&mut table);
        assert_eq!(report.wall_bounces, 1);

        // Clamped to 20, reflected to +2.4, moved, damped
        let body = table.get(BodyId(0)).unwrap();
        assert!((body.pos.x - 22.4).abs() < 1e-4);
        assert!((body.vel.x - 2.4 * 0.99).abs() < 1e-5);
    }

    #[test]
    fn test_head_on_collision_in_tick() {
        let mut table = table_with(&[
            (Vec2::new(300.0, 200.0), 20.0, Vec2::new(5.0, 0.0)),
            (Vec2::new(345.0, 200.0), 30.0, Vec2::new(-5.0, 0.0)),
        ]);

        let report = tick(&mut table);
        assert!(report.collisions >= 1);

        let small = table.get(BodyId(0)).unwrap();
        let big = table.get(BodyId(1)).unwrap();
        assert!(small.vel.x < 0.0);
        assert!(big.vel.x > 0.0);
    }

    #[test]
    fn test_non_finite_velocity_is_isolated() {
        let mut table = table_with(&[
            (Vec2::new(100.0, 100.0), 20.0, Vec2::new(f32::NAN, 1.0)),
            (Vec2::new(500.0, 200.0), 20.0, Vec2::new(2.0, 0.0)),
        ]);

        let report = tick(&mut table);
        assert_eq!(report.isolated, 1);

        let bad = table.get(BodyId(0)).unwrap();
        assert_eq!(bad.vel, Vec2::ZERO);
        assert_eq!(bad.pos, Vec2::new(100.0, 100.0));

        // The rest of the table still advanced
        let good = table.get(BodyId(1)).unwrap();
        assert_eq!(good.pos, Vec2::new(502.0, 200.0));
    }

    #[test]
    fn test_non_finite_position_does_not_spread() {
        let mut table = table_with(&[
            (Vec2::new(100.0, 120.0), 20.0, Vec2::ZERO),
            (Vec2::new(230.0, 190.0), 25.0, Vec2::new(1.0, 0.0)),
            (Vec2::new(464.0, 260.0), 30.0, Vec2::ZERO),
        ]);
        table.set_position(BodyId(0), Vec2::new(f32::NAN, 100.0));

        let report = tick(&mut table);
        assert_eq!(report.isolated, 1);

        for body in table.iter() {
            assert!(body.pos.is_finite(), "body {} pos {:?}", body.id.0, body.pos);
            assert!(body.vel.is_finite(), "body {} vel {:?}", body.id.0, body.vel);
        }
        assert_eq!(table.get(BodyId(0)).unwrap().pos, Vec2::new(400.0, 200.0));
        assert_eq!(table.get(BodyId(1)).unwrap().pos, Vec2::new(231.0, 190.0));
        assert_eq!(table.get(BodyId(2)).unwrap().pos, Vec2::new(464.0, 260.0));
    }

    #[test]
    fn test_speed_bleeds_off_over_time() {
        let mut table = table_with(&[(Vec2::new(400.0, 200.0), 20.0, Vec2::new(10.0, 6.0))]);

        for _ in 0..2000 {
            tick(&mut table);
        }
        let body = table.get(BodyId(0)).unwrap();
        assert!(body.vel.length() < 0.01);
        assert!(body.is_contained(table.bound));
    }

    #[test]
    fn test_report_merge() {
        let mut total = TickReport::default();
        total.merge(&TickReport {
            wall_bounces: 1,
            collisions: 2,
            coincident: 0,
            isolated: 1,
        });
        total.merge(&TickReport {
            wall_bounces: 3,
            ..Default::default()
        });
        assert_eq!(total.wall_bounces, 4);
        assert_eq!(total.collisions, 2);
        assert_eq!(total.isolated, 1);

        let mut full = TickReport {
            collisions: u64::MAX - 1,
            ..Default::default()
        };
        full.merge(&TickReport {
            collisions: 5,
            ..Default::default()
        });
        assert_eq!(full.collisions, u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_free_flight_speed_never_grows(
            x in 200.0f32..600.0,
            y in 150.0f32..250.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
        ) {
            // Far enough from the walls that one step can't reach them
            let mut table = table_with(&[(Vec2::new(x, y), 10.0, Vec2::new(vx, vy))]);
            let before = table.get(BodyId(0)).unwrap().vel.length();
            tick(&mut table);
            let after = table.get(BodyId(0)).unwrap().vel.length();

            prop_assert!(after <= before);
            if before > 1e-3 {
                prop_assert!(after < before);
            }
        }

        #[test]
        fn prop_boundary_pass_contains_every_body(
            seed in any::<u64>(),
            kicks in prop::collection::vec(prop::array::uniform2(-40.0f32..40.0), 6),
            ticks in 1usize..60,
        ) {
            let bound = Bound::new(800.0, 400.0);
            let specs = crate::sim::scatter(bound, 6, 30.0, seed);
            let mut table = Table::new(bound);
            for (spec, kick) in specs.iter().zip(kicks.iter()) {
                let id = table.add_body(Vec2::new(spec.x, spec.y), spec.radius, spec.color);
                table.set_velocity(id, Vec2::from(*kick));
            }

            for _ in 0..ticks {
                tick(&mut table);
            }

            // Whatever a tick left behind, a wall pass brings it back inside
            for body in table.bodies_mut() {
                resolve_boundary(body, bound);
                prop_assert!(body.is_contained(bound));
                prop_assert!(body.vel.is_finite());
            }
        }
    }
}
