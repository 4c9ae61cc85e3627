//! Live arcade sessions
//!
//! A session owns one scheduler thread that ticks the simulation on a fixed
//! wall-clock interval. Input and render reads come from other threads, so
//! the state sits behind a mutex and every tick holds it for its full
//! duration. Late wake-ups skip the missed ticks instead of catching up.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use glam::DVec2;

use crate::consts::TICK_INTERVAL;
use crate::error::{AtriumError, Result};
use crate::sim::{ArcadeState, FireSource, SeededFire, tick};

/// Shortest interval the scheduler will run at
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Session tuning
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Time between ticks
    pub tick_interval: Duration,
    /// Seed for the auto-fire generator
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            seed: 0,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// Converts elapsed wall time into due ticks, at most one per call
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    accumulator: Duration,
    skipped: u64,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_TICK_INTERVAL),
            accumulator: Duration::ZERO,
            skipped: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add elapsed time. Returns true if a tick is due; whole intervals
    /// beyond the first are dropped.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.accumulator += elapsed;
        if self.accumulator < self.interval {
            return false;
        }

        let interval = self.interval.as_nanos();
        let owed = self.accumulator.as_nanos() / interval;
        let remainder = self.accumulator.as_nanos() % interval;
        if owed > 1 {
            let missed = (owed - 1) as u64;
            self.skipped += missed;
            log::debug!("Scheduler late, skipping {} tick(s)", missed);
        }
        self.accumulator = Duration::from_nanos(remainder as u64);
        true
    }

    /// Time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }

    /// Total ticks dropped so far
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Read-only view of a session for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub score: u64,
    pub time_ticks: u64,
    pub player: DVec2,
    pub enemies: Vec<DVec2>,
    pub projectiles: Vec<DVec2>,
}

impl Snapshot {
    fn of(state: &ArcadeState) -> Self {
        Self {
            score: state.score,
            time_ticks: state.time_ticks,
            player: state.player.pos,
            enemies: state.enemy_positions(),
            projectiles: state.projectile_positions(),
        }
    }
}

struct Shared {
    state: ArcadeState,
    fire: Box<dyn FireSource>,
}

struct Scheduler {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

/// Owned handle to a running arcade session
///
/// Dropping the handle stops the scheduler.
pub struct SessionHandle {
    shared: Arc<Mutex<Shared>>,
    interval: Duration,
    scheduler: Option<Scheduler>,
}

impl SessionHandle {
    /// Start a session with a seeded auto-fire generator
    pub fn start(config: SessionConfig) -> Result<Self> {
        Self::start_with(config, SeededFire::new(config.seed))
    }

    /// Start a session with the given random source
    pub fn start_with(config: SessionConfig, fire: impl FireSource + 'static) -> Result<Self> {
        let shared = Arc::new(Mutex::new(Shared {
            state: ArcadeState::new(),
            fire: Box::new(fire),
        }));
        let mut handle = Self {
            shared,
            interval: config.tick_interval,
            scheduler: None,
        };
        handle.spawn_scheduler()?;
        log::info!(
            "Arcade session started ({} ms/tick, seed {})",
            handle.interval.as_millis(),
            config.seed
        );
        Ok(handle)
    }

    fn spawn_scheduler(&mut self) -> Result<()> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let interval = self.interval;

        let thread = thread::Builder::new()
            .name("atrium-arcade".into())
            .spawn(move || {
                let mut clock = TickClock::new(interval);
                let mut last = Instant::now();
                loop {
                    match stop_rx.recv_timeout(clock.until_next()) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    let now = Instant::now();
                    if clock.advance(now - last) {
                        let mut guard = lock(&shared);
                        let Shared { state, fire } = &mut *guard;
                        tick(state, fire.as_mut());
                    }
                    last = now;
                }
                if clock.skipped() > 0 {
                    log::info!("Scheduler skipped {} tick(s) this session", clock.skipped());
                }
            })
            .map_err(AtriumError::Spawn)?;

        self.scheduler = Some(Scheduler { stop_tx, thread });
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Stop ticking. Safe to call any number of times; once this returns
    /// no further tick runs.
    pub fn stop(&mut self) {
        let Some(scheduler) = self.scheduler.take() else {
            return;
        };
        // The thread may already be gone if it panicked
        let _ = scheduler.stop_tx.send(());
        if scheduler.thread.join().is_err() {
            log::error!("Arcade scheduler thread panicked");
        }
        log::info!("Arcade session stopped, score {}", self.current_score());
    }

    /// Stop and hand the final state back to the host
    pub fn finish(mut self) -> ArcadeState {
        self.stop();
        std::mem::take(&mut lock(&self.shared).state)
    }

    /// Throw away the current run and start over. Restarts the scheduler
    /// if the session had been stopped.
    pub fn restart(&mut self) -> Result<()> {
        lock(&self.shared).state.reset();
        if self.scheduler.is_none() {
            self.spawn_scheduler()?;
        }
        log::info!("Arcade session restarted");
        Ok(())
    }

    /// Apply a pointer sample immediately (clamped to the player region)
    pub fn set_player_intent(&self, x: f64, y: f64) {
        lock(&self.shared).state.set_player_intent(x, y);
    }

    pub fn current_score(&self) -> u64 {
        lock(&self.shared).state.score
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&lock(&self.shared).state)
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .finish()
    }
}

/// Session state is discardable, so a poisoned lock is still usable
fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;
    use crate::sim::ScriptedFire;

    fn fast() -> SessionConfig {
        SessionConfig {
            tick_interval: Duration::from_millis(2),
            seed: 1,
        }
    }

    #[test]
    fn test_clock_waits_for_full_interval() {
        let mut clock = TickClock::new(Duration::from_millis(50));
        assert!(!clock.advance(Duration::from_millis(30)));
        assert_eq!(clock.until_next(), Duration::from_millis(20));
        assert!(clock.advance(Duration::from_millis(25)));
        assert_eq!(clock.until_next(), Duration::from_millis(45));
    }

    #[test]
    fn test_clock_skips_missed_ticks() {
        let mut clock = TickClock::new(Duration::from_millis(50));
        // A 230ms stall owes four ticks; only one runs
        assert!(clock.advance(Duration::from_millis(230)));
        assert_eq!(clock.skipped(), 3);
        assert_eq!(clock.until_next(), Duration::from_millis(20));
        assert!(!clock.advance(Duration::from_millis(10)));
    }

    #[test]
    fn test_clock_rejects_zero_interval() {
        let clock = TickClock::new(Duration::ZERO);
        assert_eq!(clock.interval(), MIN_TICK_INTERVAL);
    }

    #[test]
    fn test_start_yields_fresh_state() {
        let mut session = SessionHandle::start(SessionConfig::default()).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.score, 0);
        assert_eq!(snap.enemies.len(), 15);
        assert_eq!(snap.player, pos(0.5, 0.8));
        session.stop();
    }

    #[test]
    fn test_session_ticks_and_stop_is_final() {
        let mut session = SessionHandle::start_with(fast(), ScriptedFire::never()).unwrap();
        thread::sleep(Duration::from_millis(60));
        let ticked = session.snapshot().time_ticks;
        assert!(ticked > 0);

        session.stop();
        assert!(!session.is_running());
        let frozen = session.snapshot().time_ticks;
        thread::sleep(Duration::from_millis(30));
        assert_eq!(session.snapshot().time_ticks, frozen);

        // Stopping again is harmless and does not resume ticking
        session.stop();
        session.stop();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(session.snapshot().time_ticks, frozen);
    }

    #[test]
    fn test_intent_applies_immediately() {
        let mut session = SessionHandle::start(SessionConfig::default()).unwrap();
        session.set_player_intent(2.0, -1.0);
        assert_eq!(session.snapshot().player, pos(0.9, 0.6));
        session.stop();
        session.set_player_intent(0.4, 0.75);
        assert_eq!(session.snapshot().player, pos(0.4, 0.75));
    }

    #[test]
    fn test_finish_returns_state() {
        let session = SessionHandle::start_with(fast(), ScriptedFire::never()).unwrap();
        thread::sleep(Duration::from_millis(20));
        let state = session.finish();
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 15);
        assert!(state.time_ticks > 0);
    }

    #[test]
    fn test_restart_resets_and_resumes() {
        let mut session = SessionHandle::start_with(fast(), ScriptedFire::never()).unwrap();
        thread::sleep(Duration::from_millis(20));
        session.stop();
        session.set_player_intent(0.2, 0.7);

        session.restart().unwrap();
        assert!(session.is_running());
        assert_eq!(session.snapshot().player, pos(0.5, 0.8));
        thread::sleep(Duration::from_millis(20));
        assert!(session.snapshot().time_ticks > 0);
    }
}
