//! Multi-episode integration tests driving rewards and observations the
//! way an environment does: reset at episode start, obtain after each step.

use std::sync::Arc;

use indexmap::IndexMap;
use proptest::prelude::*;
use tally::prelude::*;
use tally::types::Lifecycle;
use tally_test_utils::{root_node, CountingSignal, MockSolver};

struct Env {
    solver: MockSolver,
    reward: Reward<MockSolver>,
    observation: DictFunction<MockSolver, f64>,
}

impl Env {
    fn new(reward: Reward<MockSolver>, observation: DictFunction<MockSolver, f64>) -> Self {
        Self {
            solver: MockSolver::new(),
            reward,
            observation,
        }
    }

    fn reset(&mut self) -> Result<IndexMap<String, f64>, SignalError> {
        self.solver = MockSolver::new();
        self.reward.reset(&self.solver)?;
        self.observation.reset(&self.solver)?;
        self.observation.obtain(&self.solver, StepFlags::NONE)
    }

    fn step(
        &mut self,
        lp: u64,
        nodes: u64,
        done: bool,
    ) -> Result<(IndexMap<String, f64>, f64), SignalError> {
        self.solver.advance(lp, nodes);
        let flags = StepFlags::done(done);
        let obs = self.observation.obtain(&self.solver, flags)?;
        let reward = self.reward.obtain(&self.solver, flags)?;
        Ok((obs, reward))
    }
}

#[test]
fn rewards_follow_solver_work_across_episodes() {
    let reward = 5.0 * Reward::new(IsDone::new()) + neg_lp_iterations();
    let observation = DictFunction::builder()
        .with("lp", LpIterations::new().shared())
        .with("nodes", NNodes::new().shared())
        .build()
        .unwrap();
    let mut env = Env::new(reward, observation);

    for _ in 0..3 {
        let obs = env.reset().unwrap();
        assert_eq!(obs["lp"], 0.0);
        assert_eq!(obs["nodes"], 0.0);

        let (obs, r) = env.step(10, 1, false).unwrap();
        assert_eq!(r, -10.0);
        assert_eq!(obs["lp"], 10.0);

        let (obs, r) = env.step(5, 2, true).unwrap();
        assert_eq!(r, 5.0 - 15.0);
        assert_eq!(obs["lp"], 15.0);
        assert_eq!(obs["nodes"], 3.0);
    }
}

#[test]
fn reward_subtree_shared_with_observation_resets_once_per_pass() {
    let counter = Arc::new(CountingSignal::new("episodes"));
    let episodes: Reward<MockSolver> = Reward::from_shared(counter.clone());
    let reward = episodes.clone() * 2.0;
    let observation = DictFunction::new([
        ("episodes", episodes.clone().shared()),
        ("reward", reward.clone().shared()),
    ])
    .unwrap();

    let state = MockSolver::new();
    for n in 1..=3 {
        // One pass from the observation root reaches the shared leaf twice.
        observation.reset(&state).unwrap();
        assert_eq!(counter.resets(), 2 * n - 1);

        // A second root reset is a new pass and resets the leaf again.
        reward.reset(&state).unwrap();
        assert_eq!(counter.resets(), 2 * n);

        let obs = observation.obtain(&state, StepFlags::NONE).unwrap();
        assert_eq!(obs["episodes"], (2 * n) as f64);
        assert_eq!(obs["reward"], (4 * n) as f64);
    }
}

#[test]
fn obtain_before_reset_fails_then_recovers() {
    let reward = Reward::new(IsDone::new()) - 1;
    let state = MockSolver::new();
    assert!(matches!(
        reward.obtain(&state, StepFlags::DONE),
        Err(SignalError::UninitializedUse { .. })
    ));
    reward.reset(&state).unwrap();
    assert_eq!(reward.obtain(&state, StepFlags::DONE).unwrap(), 0.0);
}

#[test]
fn heterogeneous_observation_as_value() {
    let observation: TupleFunction<MockSolver, Value> = TupleFunction::new(vec![
        NNodes::new().into_value().shared(),
        Nothing.into_value().shared(),
        TupleFunction::new(vec![IsDone::new().shared(), Constant::new(3.0).shared()])
            .unwrap()
            .into_value()
            .shared(),
    ])
    .unwrap();

    let mut state = MockSolver::new();
    observation.reset(&state).unwrap();
    state.advance(0, 4);
    let obs = observation.obtain(&state, StepFlags::DONE).unwrap();
    assert_eq!(
        obs,
        vec![
            Value::Scalar(4.0),
            Value::Unit,
            Value::Tuple(vec![Value::Scalar(1.0), Value::Scalar(3.0)]),
        ]
    );
}

#[test]
fn focus_node_observed_alongside_counters() {
    let observation: DictFunction<MockSolver, Value> = DictFunction::builder()
        .with("node", FocusNode::<MockSolver>::new().into_value().shared())
        .with("nodes", NNodes::<MockSolver>::new().into_value().shared())
        .build()
        .unwrap();

    let mut state = MockSolver::new();
    observation.reset(&state).unwrap();
    let obs = observation.obtain(&state, StepFlags::NONE).unwrap();
    assert_eq!(obs["node"], Value::Unit);

    state.advance(3, 1);
    state.set_focus_node(Some(root_node(1, -4.0)));
    let obs = observation.obtain(&state, StepFlags::NONE).unwrap();
    assert_eq!(obs["nodes"], Value::Scalar(1.0));
    let node = obs["node"].as_dict().unwrap();
    assert_eq!(node["depth"], Value::Scalar(0.0));
    assert_eq!(node["lowerbound"], Value::Scalar(-4.0));
    assert_eq!(node["parent_lowerbound"], Value::Unit);
}

#[test]
fn lifecycle_is_reexported() {
    let lc = Lifecycle::new();
    assert!(lc.ensure_ready("x").is_err());
}

proptest! {
    #[test]
    fn episode_reward_is_sum_of_step_costs(
        steps in prop::collection::vec(0u64..500, 1..20),
    ) {
        let mut env = Env::new(
            neg_lp_iterations(),
            DictFunction::new([("lp", LpIterations::new().shared())]).unwrap(),
        );
        env.reset().unwrap();
        let mut total = 0u64;
        for (i, &lp) in steps.iter().enumerate() {
            total += lp;
            let done = i + 1 == steps.len();
            let (obs, r) = env.step(lp, 0, done).unwrap();
            prop_assert_eq!(r, -(total as f64));
            prop_assert_eq!(obs["lp"], total as f64);
        }
    }
}
