/// Knight relaxation network — Engine
///
/// `RelaxationSession` is the inner loop: epochs until nothing changes or
/// the cap is hit. `KnightEngine` owns the network and the seeded RNG and
/// runs the outer relax → validate → restart loop.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::domain::{Network, RelaxConfig, RelaxOutcome, TourSolution};
use crate::error::{KnightError, Result};
use crate::events::RelaxEvent;
use crate::graph::build_knight_network;
use crate::hashing::canonical_hash;
use crate::restart::restart_network;
use crate::update::{run_epoch, EpochReport};
use crate::validator::verify_tour;

// ---------------------------------------------------------------------------
// Relaxation controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxPhase {
    Running,
    Converged,
    Expired,
}

/// Per-run relaxation state: the "something changed" flag and the epoch
/// counter. A fresh session starts with the flag raised.
#[derive(Debug, Clone)]
pub struct RelaxationSession {
    changed: bool,
    epochs: u64,
    epoch_cap: u64,
    phase: RelaxPhase,
}

impl RelaxationSession {
    pub fn new(epoch_cap: u64) -> Self {
        Self {
            changed: true,
            epochs: 0,
            epoch_cap,
            phase: RelaxPhase::Running,
        }
    }

    pub fn phase(&self) -> RelaxPhase {
        self.phase
    }

    pub fn epochs(&self) -> u64 {
        self.epochs
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Run one epoch if still running and return the resulting phase.
    pub fn step(&mut self, network: &mut Network) -> RelaxPhase {
        if self.phase != RelaxPhase::Running {
            return self.phase;
        }
        if self.epochs >= self.epoch_cap {
            self.phase = RelaxPhase::Expired;
            return self.phase;
        }

        self.epochs += 1;
        let report = run_epoch(network);
        self.changed = report.changed();

        if !self.changed {
            self.phase = RelaxPhase::Converged;
        } else if self.epochs >= self.epoch_cap {
            self.phase = RelaxPhase::Expired;
        }
        self.phase
    }

    /// Step until the session leaves `Running`.
    pub fn run(&mut self, network: &mut Network) -> RelaxOutcome {
        while self.step(network) == RelaxPhase::Running {}
        match self.phase {
            RelaxPhase::Converged => RelaxOutcome::Converged {
                epochs: self.epochs,
            },
            _ => RelaxOutcome::Expired {
                epochs: self.epochs,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Result of one relax + validate attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    /// 1-based attempt number.
    pub attempt: u64,
    pub outcome: RelaxOutcome,
    pub accepted: bool,
    /// Why the validator refused the configuration.
    pub rejection: Option<String>,
}

pub struct KnightEngine {
    network: Network,
    rng: ChaCha8Rng,
    config: RelaxConfig,
    attempts: u64,
    events: Vec<RelaxEvent>,
}

impl KnightEngine {
    /// Build the board network for `config.board_size`, seeding the RNG
    /// from `config.seed`.
    pub fn new(config: RelaxConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let network = build_knight_network(config.board_size, &mut rng)?;
        if config.encoding.is_ambiguous_for(config.board_size) {
            warn!(
                board_size = config.board_size,
                "legacy position encoding is ambiguous on boards larger than 10"
            );
        }
        debug!(
            board_size = config.board_size,
            nodes = network.node_count(),
            edges = network.edge_count(),
            "network initialised"
        );
        Ok(Self::with_network(network, rng, config))
    }

    /// Wrap an already-built network (any topology).
    pub fn from_network(network: Network, config: RelaxConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_network(network, rng, config)
    }

    fn with_network(network: Network, rng: ChaCha8Rng, config: RelaxConfig) -> Self {
        Self {
            network,
            rng,
            config,
            attempts: 0,
            events: Vec::new(),
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn config(&self) -> &RelaxConfig {
        &self.config
    }

    /// Attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn events(&self) -> &[RelaxEvent] {
        &self.events
    }

    fn record(&mut self, event: RelaxEvent) {
        event.emit();
        self.events.push(event);
    }

    /// A single epoch outside any session; used to observe trajectories.
    pub fn step_epoch(&mut self) -> EpochReport {
        run_epoch(&mut self.network)
    }

    /// Relax the current configuration until it converges or expires.
    pub fn relax(&mut self) -> RelaxOutcome {
        let mut session = RelaxationSession::new(self.config.epoch_cap);
        let outcome = session.run(&mut self.network);
        let attempt = self.attempts;
        match outcome {
            RelaxOutcome::Converged { epochs } => {
                self.record(RelaxEvent::Converged { attempt, epochs })
            }
            RelaxOutcome::Expired { epochs } => {
                self.record(RelaxEvent::EpochsExpired { attempt, epochs })
            }
        }
        outcome
    }

    /// Run the tour validator on the current outputs.
    pub fn validate(&mut self) -> bool {
        verify_tour(&mut self.network).is_ok()
    }

    /// Re-randomise outputs, zero states and clear visit marks.
    pub fn restart(&mut self) {
        restart_network(&mut self.network, &mut self.rng);
    }

    /// Relax and validate once. Does not restart on rejection.
    pub fn attempt(&mut self) -> AttemptReport {
        self.attempts += 1;
        let attempt = self.attempts;
        let outcome = self.relax();
        let rejection = verify_tour(&mut self.network).err().map(|r| r.to_string());

        match &rejection {
            None => self.record(RelaxEvent::TourAccepted { attempt }),
            Some(reason) => self.record(RelaxEvent::AttemptRejected {
                attempt,
                reason: reason.clone(),
            }),
        }

        AttemptReport {
            attempt,
            outcome,
            accepted: rejection.is_none(),
            rejection,
        }
    }

    /// True if another attempt is allowed by `max_attempts`.
    pub fn can_attempt(&self) -> bool {
        match self.config.max_attempts {
            Some(max) => self.attempts < max,
            None => true,
        }
    }

    /// Relax, validate and restart until a tour is accepted or
    /// `max_attempts` is used up.
    pub fn solve(&mut self) -> Result<TourSolution> {
        if self.config.max_attempts.is_none() {
            warn!("max_attempts is unset; the search may never terminate");
        }
        loop {
            if !self.can_attempt() {
                return Err(KnightError::AttemptsExhausted {
                    attempts: self.attempts,
                });
            }
            let report = self.attempt();
            if report.accepted {
                return Ok(TourSolution {
                    attempts: report.attempt,
                    outcome: report.outcome,
                    hash: canonical_hash(&self.network),
                });
            }
            self.restart();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_network;

    /// Square a-b-c-d-a with every edge on and a settled state.
    fn settled_square() -> Network {
        let mut net = build_network(
            &[(0, 0), (1, 0), (1, 1), (0, 1)],
            &[(0, 1), (1, 2), (2, 3), (3, 0)],
            &[1, 1, 1, 1],
        );
        for e in &mut net.edges {
            e.state = 5;
        }
        net
    }

    fn config(seed: u64) -> RelaxConfig {
        RelaxConfig {
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_session_converges_on_fixed_point() {
        let mut net = settled_square();
        let mut session = RelaxationSession::new(100);
        assert!(session.changed());
        let outcome = session.run(&mut net);
        assert_eq!(outcome, RelaxOutcome::Converged { epochs: 1 });
        assert_eq!(session.phase(), RelaxPhase::Converged);
        assert!(!session.changed());
    }

    #[test]
    fn test_fixed_point_is_idempotent() {
        let mut net = settled_square();
        RelaxationSession::new(100).run(&mut net);
        let before = canonical_hash(&net);
        let report = run_epoch(&mut net);
        assert!(!report.changed());
        assert_eq!(report.output_flips, 0);
        assert_eq!(canonical_hash(&net), before);
    }

    #[test]
    fn test_session_expires_at_cap() {
        let mut engine = KnightEngine::new(RelaxConfig {
            epoch_cap: 1,
            ..config(3)
        })
        .unwrap();
        let mut session = RelaxationSession::new(1);
        // From zero states the first epoch always moves some state.
        let outcome = session.run(engine.network_mut());
        assert_eq!(outcome, RelaxOutcome::Expired { epochs: 1 });
        assert_eq!(session.step(engine.network_mut()), RelaxPhase::Expired);
        assert_eq!(session.epochs(), 1);
    }

    #[test]
    fn test_zero_cap_expires_without_epochs() {
        let mut net = settled_square();
        let outcome = RelaxationSession::new(0).run(&mut net);
        assert_eq!(outcome, RelaxOutcome::Expired { epochs: 0 });
    }

    #[test]
    fn test_trajectories_are_deterministic() {
        let mut a = KnightEngine::new(config(11)).unwrap();
        let mut b = KnightEngine::new(config(11)).unwrap();
        assert_eq!(canonical_hash(a.network()), canonical_hash(b.network()));
        for _ in 0..25 {
            let ra = a.step_epoch();
            let rb = b.step_epoch();
            assert_eq!(ra, rb);
            assert_eq!(canonical_hash(a.network()), canonical_hash(b.network()));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = KnightEngine::new(config(1)).unwrap();
        let b = KnightEngine::new(config(2)).unwrap();
        assert_ne!(canonical_hash(a.network()), canonical_hash(b.network()));
    }

    #[test]
    fn test_rejects_bad_board_size() {
        let err = KnightEngine::new(RelaxConfig {
            board_size: 30,
            ..Default::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, KnightError::BoardSizeOutOfRange { size: 30 }));
    }

    #[test]
    fn test_attempt_records_events() {
        let mut engine = KnightEngine::new(RelaxConfig {
            epoch_cap: 5,
            ..config(4)
        })
        .unwrap();
        let report = engine.attempt();
        assert_eq!(report.attempt, 1);
        assert_eq!(engine.attempts(), 1);
        assert_eq!(report.accepted, report.rejection.is_none());
        assert_eq!(engine.events().len(), 2);
        assert!(engine.events().iter().all(|e| e.attempt() == Some(1)));
    }

    #[test]
    fn test_solve_is_bounded() {
        let mut engine = KnightEngine::new(RelaxConfig {
            epoch_cap: 20,
            max_attempts: Some(3),
            ..config(5)
        })
        .unwrap();
        match engine.solve() {
            Ok(solution) => {
                assert!(solution.attempts <= 3);
                assert!(engine.validate());
            }
            Err(KnightError::AttemptsExhausted { attempts }) => {
                assert_eq!(attempts, 3);
                assert!(!engine.can_attempt());
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_zero_attempts_fails_immediately() {
        let mut engine = KnightEngine::new(RelaxConfig {
            max_attempts: Some(0),
            ..config(6)
        })
        .unwrap();
        assert!(matches!(
            engine.solve(),
            Err(KnightError::AttemptsExhausted { attempts: 0 })
        ));
    }

    #[test]
    fn test_solve_accepts_hand_built_path() {
        // Three squares in a line, already settled as a path.
        let mut net = build_network(&[(0, 0), (1, 0), (2, 0)], &[(0, 1), (1, 2)], &[1, 1]);
        for e in &mut net.edges {
            e.state = 5;
        }
        let mut engine = KnightEngine::from_network(
            net,
            RelaxConfig {
                epoch_cap: 50,
                max_attempts: Some(1),
                ..Default::default()
            },
        );
        let solution = engine.solve().unwrap();
        assert_eq!(solution.attempts, 1);
        // Endpoint edges keep gaining state, so the run only stops at the cap.
        assert_eq!(solution.outcome, RelaxOutcome::Expired { epochs: 50 });
    }
}
