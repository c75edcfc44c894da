//! Integration tests for sw-sim.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use sw_agent::{Agent, AgentStore, SpawnOptions};
use sw_core::{AgentRng, BoundaryPolicy, ColorPolicy, Point2, Rgb, SimConfig, Size, Tick, World};
use sw_steer::{MotionParams, RandomTurn, Spin, Steering, StepContext, Straight};

use crate::{LatestSnapshot, NoopObserver, Sim, SimBuilder, SimError, SimObserver, StopHandle};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(population: usize, total_ticks: u64) -> SimConfig {
    SimConfig {
        population,
        world:                 Size::new(100, 50),
        dt:                    1.0,
        speed:                 1.0,
        turn_noise:            0.5,
        boundary:              BoundaryPolicy::Wrap,
        color:                 ColorPolicy::Hold,
        seed:                  42,
        total_ticks,
        num_threads:           Some(2),
        output_interval_ticks: total_ticks,
    }
}

/// A sim over an explicit population.
fn sim_with<S: Steering>(config: SimConfig, agents: Vec<Agent>, steering: S) -> Sim<S> {
    let config = SimConfig { population: agents.len(), ..config };
    let store = AgentStore::from_agents(agents).unwrap();
    SimBuilder::new(config, store, steering).build().unwrap()
}

fn one_agent<S: Steering>(config: SimConfig, agent: Agent, steering: S) -> Agent {
    let mut sim = sim_with(config, vec![agent], steering);
    sim.step().unwrap();
    *sim.agents.get(0).unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

/// Always turns by a non-finite amount.
struct Broken;

impl Steering for Broken {
    fn turn(&self, _: &Agent, _: &StepContext<'_>, _: &mut AgentRng) -> f32 {
        f32::INFINITY
    }
}

// ── Per-agent update ──────────────────────────────────────────────────────────

#[cfg(test)]
mod kernel_tests {
    use super::*;

    #[test]
    fn wrap_crosses_right_edge() {
        let start = Agent::new(Point2::new(100.0 - 0.01, 10.0), 0.0);
        let next = one_agent(test_config(1, 1), start, Straight);
        let expected = (100.0f32 - 0.01 + 1.0).rem_euclid(100.0);
        assert!(approx(next.position.x, expected), "x = {}", next.position.x);
        assert!(approx(next.position.y, 10.0));
        assert!(next.position.x < 1.0);
        assert_eq!(next.angle, 0.0);
    }

    #[test]
    fn wrap_crosses_left_edge() {
        let start = Agent::new(Point2::new(0.25, 10.0), PI);
        let next = one_agent(test_config(1, 1), start, Straight);
        assert!(approx(next.position.x, 99.25), "x = {}", next.position.x);
    }

    #[test]
    fn clamp_holds_agent_on_wall() {
        let config = SimConfig {
            boundary: BoundaryPolicy::Clamp { reflect: false },
            ..test_config(1, 1)
        };
        let next = one_agent(config, Agent::new(Point2::new(99.5, 10.0), 0.0), Straight);
        assert_eq!(next.position.x, 100.0);
        assert_eq!(next.angle, 0.0);
    }

    #[test]
    fn clamp_reflect_mirrors_heading_on_x_wall() {
        let config = SimConfig {
            boundary: BoundaryPolicy::Clamp { reflect: true },
            ..test_config(1, 1)
        };
        let next = one_agent(config, Agent::new(Point2::new(99.5, 10.0), 0.0), Straight);
        assert_eq!(next.position.x, 100.0);
        assert!(approx(next.angle, PI), "angle = {}", next.angle);
    }

    #[test]
    fn clamp_reflect_negates_heading_on_y_wall() {
        let config = SimConfig {
            boundary: BoundaryPolicy::Clamp { reflect: true },
            ..test_config(1, 1)
        };
        let next = one_agent(config, Agent::new(Point2::new(10.0, 49.5), FRAC_PI_2), Straight);
        assert_eq!(next.position.y, 50.0);
        assert!(approx(next.angle, 3.0 * FRAC_PI_2), "angle = {}", next.angle);
    }

    #[test]
    fn non_finite_angle_falls_back_to_zero() {
        let next = one_agent(
            test_config(1, 1),
            Agent::new(Point2::new(10.0, 10.0), f32::NAN),
            Straight,
        );
        assert_eq!(next.angle, 0.0);
        assert!(approx(next.position.x, 11.0));
    }

    #[test]
    fn non_finite_turn_keeps_previous_heading() {
        let start = Agent::new(Point2::new(10.0, 10.0), 1.0);
        let next = one_agent(test_config(1, 1), start, Broken);
        assert_eq!(next.angle, 1.0);
        assert!(next.position.is_finite());
    }

    #[test]
    fn non_finite_position_restarts_at_center() {
        let next = one_agent(
            test_config(1, 1),
            Agent::new(Point2::new(f32::NAN, 5.0), 0.0),
            Straight,
        );
        assert!(approx(next.position.x, 51.0), "x = {}", next.position.x);
        assert!(approx(next.position.y, 25.0));
    }

    #[test]
    fn hold_keeps_color() {
        let start = Agent::colored(Point2::new(10.0, 10.0), 2.0, Rgb::RED);
        let next = one_agent(test_config(1, 1), start, Spin::new(0.5));
        assert_eq!(next.color, Some(Rgb::RED));
    }

    #[test]
    fn heading_hue_follows_new_angle() {
        let config = SimConfig { color: ColorPolicy::HeadingHue, ..test_config(1, 1) };
        let start = Agent::colored(Point2::new(10.0, 10.0), 2.0, Rgb::RED);
        let next = one_agent(config, start, Spin::new(0.5));
        assert_eq!(next.color, Some(Rgb::from_hue(next.angle)));
    }

    #[test]
    fn heading_hue_leaves_plain_agents_plain() {
        let config = SimConfig { color: ColorPolicy::HeadingHue, ..test_config(1, 1) };
        let next = one_agent(config, Agent::new(Point2::new(10.0, 10.0), 2.0), Spin::new(0.5));
        assert_eq!(next.color, None);
    }

    #[test]
    fn advance_agent_reads_only_its_inputs() {
        let world = World::configure(100, 50).unwrap();
        let params = MotionParams { speed: 2.0, ..MotionParams::default() };
        let ctx = StepContext::new(Tick(0), 0.5, &world, params);
        let agent = Agent::new(Point2::new(20.0, 20.0), 0.0);
        let next = crate::kernel::advance_agent(&Straight, &agent, &ctx);
        assert!(approx(next.position.x, 21.0));
    }

    #[test]
    fn noisy_update_depends_only_on_record_and_step() {
        let world = World::configure(100, 50).unwrap();
        let params = MotionParams { turn_noise: 3.0, seed: 11, ..MotionParams::default() };
        let ctx = StepContext::new(Tick(4), 0.5, &world, params);
        let agent = Agent::new(Point2::new(20.0, 20.0), 1.0);

        let once = crate::kernel::advance_agent(&RandomTurn, &agent, &ctx);
        let again = crate::kernel::advance_agent(&RandomTurn, &agent, &ctx);
        assert_eq!(once, again);

        let later = StepContext::new(Tick(5), 0.5, &world, params);
        assert_ne!(once, crate::kernel::advance_agent(&RandomTurn, &agent, &later));
    }
}

// ── Step-level properties ─────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    fn spawned(config: SimConfig) -> Sim<RandomTurn> {
        SimBuilder::spawn(config, SpawnOptions::default(), RandomTurn)
            .unwrap()
            .build()
            .unwrap()
    }

    fn noisy_config(boundary: BoundaryPolicy) -> SimConfig {
        SimConfig {
            population: 500,
            world:      Size::new(200, 100),
            dt:         0.1,
            speed:      40.0,
            turn_noise: 3.0,
            boundary,
            ..test_config(500, 50)
        }
    }

    #[test]
    fn spawn_fills_population() {
        let sim = spawned(noisy_config(BoundaryPolicy::Wrap));
        assert_eq!(sim.snapshot().len(), 500);
        assert_eq!(sim.agents.generation(), Tick::ZERO);
    }

    #[test]
    fn wrap_keeps_agents_in_half_open_world() {
        let mut sim = spawned(noisy_config(BoundaryPolicy::Wrap));
        for _ in 0..50 {
            sim.step().unwrap();
            for a in sim.agents.agents() {
                assert!(sim.world().contains(a.position), "{} escaped", a.position);
                assert!(a.angle.is_finite() && (0.0..TAU).contains(&a.angle));
            }
        }
    }

    #[test]
    fn clamp_keeps_agents_in_closed_world() {
        let mut sim = spawned(noisy_config(BoundaryPolicy::Clamp { reflect: true }));
        for _ in 0..50 {
            sim.step().unwrap();
            for a in sim.agents.agents() {
                assert!(sim.world().contains_inclusive(a.position), "{} escaped", a.position);
                assert!(a.angle.is_finite() && (0.0..TAU).contains(&a.angle));
            }
        }
    }

    #[test]
    fn swapping_inputs_swaps_outputs() {
        let a = Agent::colored(Point2::new(10.0, 10.0), 0.3, Rgb::RED);
        let b = Agent::colored(Point2::new(40.0, 20.0), 2.0, Rgb::GREEN);
        let c = Agent::colored(Point2::new(99.5, 49.5), 5.5, Rgb::BLUE);

        let mut forward = sim_with(test_config(3, 1), vec![a, b, c], Spin::new(0.7));
        let mut swapped = sim_with(test_config(3, 1), vec![c, b, a], Spin::new(0.7));
        forward.step().unwrap();
        swapped.step().unwrap();

        let f = forward.agents.agents();
        let s = swapped.agents.agents();
        assert_eq!(f[0], s[2]);
        assert_eq!(f[1], s[1]);
        assert_eq!(f[2], s[0]);
    }

    #[test]
    fn swapping_inputs_swaps_outputs_straight() {
        let a = Agent::new(Point2::new(1.0, 2.0), 4.0);
        let b = Agent::new(Point2::new(60.0, 30.0), 1.0);
        let mut forward = sim_with(test_config(2, 1), vec![a, b], Straight);
        let mut swapped = sim_with(test_config(2, 1), vec![b, a], Straight);
        forward.step().unwrap();
        swapped.step().unwrap();
        assert_eq!(forward.agents.agents()[0], swapped.agents.agents()[1]);
        assert_eq!(forward.agents.agents()[1], swapped.agents.agents()[0]);
    }

    #[test]
    fn swapping_inputs_swaps_outputs_with_noise() {
        let a = Agent::colored(Point2::new(10.0, 10.0), 0.3, Rgb::RED);
        let b = Agent::colored(Point2::new(40.0, 20.0), 2.0, Rgb::GREEN);
        let c = Agent::colored(Point2::new(99.5, 49.5), 5.5, Rgb::BLUE);
        let config = SimConfig { turn_noise: 4.0, ..test_config(3, 1) };

        let mut forward = sim_with(config.clone(), vec![a, b, c], RandomTurn);
        let mut swapped = sim_with(config, vec![c, b, a], RandomTurn);
        for _ in 0..5 {
            forward.step().unwrap();
            swapped.step().unwrap();
            let f = forward.agents.agents();
            let s = swapped.agents.agents();
            assert_eq!(f[0], s[2]);
            assert_eq!(f[1], s[1]);
            assert_eq!(f[2], s[0]);
        }
    }

    #[test]
    fn identical_records_move_identically() {
        let twin = Agent::new(Point2::new(30.0, 30.0), 1.0);
        let config = SimConfig { turn_noise: 4.0, ..test_config(4, 1) };
        let mut sim = sim_with(config, vec![twin; 4], RandomTurn);
        sim.step().unwrap();
        let out = sim.agents.agents();
        assert!(out.iter().all(|a| *a == out[0]));
        assert_ne!(out[0].angle, twin.angle);
    }

    #[test]
    fn configuring_twice_gives_identical_runs() {
        assert_eq!(World::configure(100, 50).unwrap(), World::configure(100, 50).unwrap());

        let mut a = spawned(noisy_config(BoundaryPolicy::Wrap));
        let mut b = spawned(noisy_config(BoundaryPolicy::Wrap));
        assert_eq!(a.world(), b.world());
        for _ in 0..10 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert_eq!(a.agents.agents(), b.agents.agents());
    }

    #[test]
    fn non_positive_dt_rejected() {
        let mut sim = sim_with(test_config(1, 1), vec![Agent::default()], Straight);
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(sim.step_with(dt), Err(SimError::InvalidConfig(_))), "dt {dt}");
        }
        assert_eq!(sim.agents.generation(), Tick::ZERO);
        assert_eq!(sim.current_tick(), Tick::ZERO);
    }

    #[test]
    fn step_with_accumulates_elapsed_time() {
        let mut sim = sim_with(test_config(1, 1), vec![Agent::default()], Straight);
        sim.step_with(0.5).unwrap();
        sim.step_with(0.25).unwrap();
        assert!((sim.elapsed_secs() - 0.75).abs() < 1e-9);
        assert_eq!(sim.clock().elapsed_secs(), sim.elapsed_secs());
        assert_eq!(sim.current_tick(), Tick(2));
        assert_eq!(sim.agents.generation(), Tick(2));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn population_mismatch_errors() {
        let store = AgentStore::from_agents(vec![Agent::default(); 3]).unwrap();
        let result = SimBuilder::new(test_config(4, 1), store, Straight).build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 4, got: 3, .. })
        ));
    }

    #[test]
    fn built_sim_exposes_its_config_and_world() {
        let config = SimConfig { speed: 3.0, ..test_config(3, 1) };
        let store = AgentStore::from_agents(vec![Agent::default(); 3]).unwrap();
        let sim = SimBuilder::new(config.clone(), store, Straight).build().unwrap();
        assert_eq!(sim.config(), &config);
        assert_eq!(sim.world().size(), config.world);
        assert_eq!(sim.current_tick(), Tick::ZERO);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SimConfig { dt: 0.0, ..test_config(3, 1) };
        let result = SimBuilder::spawn(config, SpawnOptions::default(), Straight);
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn empty_palette_rejected() {
        let options = SpawnOptions { palette: Some(Vec::new()), ..SpawnOptions::default() };
        let result = SimBuilder::spawn(test_config(3, 1), options, Straight);
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }
}

// ── Run loop and observers ────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        starts:         u64,
        ends:           u64,
        snapshot_ticks: Vec<Tick>,
        finished:       Option<Tick>,
    }

    impl SimObserver for Counting {
        fn on_step_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_step_end(&mut self, _tick: Tick, agents: usize) {
            assert_eq!(agents, 4);
            self.ends += 1;
        }
        fn on_snapshot(&mut self, snapshot: &sw_agent::Snapshot, _elapsed_secs: f64) {
            self.snapshot_ticks.push(snapshot.tick());
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.finished = Some(final_tick);
        }
    }

    /// Requests a stop once `after` steps have ended.
    struct StopAfter {
        after: u64,
        seen:  u64,
        stop:  StopHandle,
    }

    impl SimObserver for StopAfter {
        fn on_step_end(&mut self, _tick: Tick, _agents: usize) {
            self.seen += 1;
            if self.seen == self.after {
                self.stop.stop();
            }
        }
    }

    fn four() -> Vec<Agent> {
        (0..4).map(|i| Agent::new(Point2::new(i as f32 * 10.0, 5.0), 0.0)).collect()
    }

    #[test]
    fn runs_to_end_tick() {
        let mut sim = sim_with(test_config(4, 7), four(), RandomTurn);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(7));
        assert_eq!(sim.agents.generation(), Tick(7));
    }

    #[test]
    fn observer_call_counts() {
        let config = SimConfig { output_interval_ticks: 3, ..test_config(4, 10) };
        let mut sim = sim_with(config, four(), Straight);
        let mut obs = Counting::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 10);
        assert_eq!(obs.ends, 10);
        assert_eq!(obs.snapshot_ticks, vec![Tick(3), Tick(6), Tick(9)]);
        assert_eq!(obs.finished, Some(Tick(10)));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let config = SimConfig { output_interval_ticks: 0, ..test_config(4, 5) };
        let mut sim = sim_with(config, four(), Straight);
        let mut obs = Counting::default();
        sim.run(&mut obs).unwrap();
        assert!(obs.snapshot_ticks.is_empty());
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = sim_with(test_config(4, 2), four(), Straight);
        let mut obs = Counting::default();
        sim.run_ticks(5, &mut obs).unwrap();
        assert_eq!(sim.current_tick(), Tick(5));
        assert_eq!(obs.ends, 5);
        assert_eq!(obs.finished, None);
    }

    #[test]
    fn stop_handle_ends_run_between_steps() {
        let mut sim = sim_with(test_config(4, 100), four(), RandomTurn);
        let mut obs = StopAfter { after: 3, seen: 0, stop: sim.stop_handle() };
        sim.run(&mut obs).unwrap();
        assert_eq!(sim.current_tick(), Tick(3));
        assert_eq!(sim.agents.generation(), Tick(3));
    }

    #[test]
    fn stop_before_run_does_nothing() {
        let stop = StopHandle::new();
        let config = test_config(4, 10);
        let store = AgentStore::from_agents(four()).unwrap();
        let mut sim = SimBuilder::new(config, store, Straight)
            .stop_handle(stop.clone())
            .build()
            .unwrap();
        stop.stop();
        let mut obs = Counting::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 0);
        assert_eq!(obs.finished, Some(Tick::ZERO));

        stop.reset();
        sim.run(&mut obs).unwrap();
        assert_eq!(sim.current_tick(), Tick(10));
    }

    #[test]
    fn latest_snapshot_sees_last_publish() {
        let config = SimConfig { output_interval_ticks: 4, ..test_config(4, 10) };
        let mut sim = sim_with(config, four(), Spin::new(0.2));
        let mut latest = LatestSnapshot::new();
        let reader = latest.clone();
        assert!(reader.get().is_none());

        sim.run(&mut latest).unwrap();
        let snap = reader.get().unwrap();
        assert_eq!(snap.tick(), Tick(8));
        assert_eq!(snap.len(), 4);
    }

    #[test]
    fn snapshot_is_detached_from_store() {
        let mut sim = sim_with(test_config(4, 10), four(), Straight);
        let before = sim.snapshot();
        sim.step().unwrap();
        assert_eq!(before.tick(), Tick::ZERO);
        assert_ne!(before.agents(), sim.agents.agents());
    }
}

// ── Sequential vs parallel ────────────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod parallel_tests {
    use sw_agent::AgentStoreBuilder;

    use super::*;
    use crate::kernel::{step_parallel, step_sequential};

    #[test]
    fn kernels_bit_identical() {
        let world = World::configure(300, 200).unwrap();
        let store = AgentStoreBuilder::new(5_000, 7).build(&world).unwrap();
        let params = MotionParams { turn_noise: 4.0, ..MotionParams::default() };
        let ctx = StepContext::new(Tick(0), 0.05, &world, params);

        let current = store.agents();
        let mut seq = current.to_vec();
        let mut par = current.to_vec();
        step_sequential(&RandomTurn, &ctx, current, &mut seq);
        step_parallel(&RandomTurn, &ctx, current, &mut par);
        assert_eq!(seq, par);
    }

    #[test]
    fn thread_count_does_not_change_results() {
        let run = |threads: usize| {
            let config = SimConfig {
                population:  2_000,
                world:       Size::new(300, 200),
                dt:          0.05,
                speed:       30.0,
                turn_noise:  4.0,
                num_threads: Some(threads),
                ..test_config(2_000, 20)
            };
            let mut sim = SimBuilder::spawn(config, SpawnOptions::default(), RandomTurn)
                .unwrap()
                .build()
                .unwrap();
            sim.run(&mut NoopObserver).unwrap();
            sim.snapshot()
        };
        assert_eq!(run(1).agents(), run(4).agents());
    }
}
