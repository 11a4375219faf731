//! Sparkle particles over the `.hero` section.

pub const BATCH_MIN: usize = 5;
pub const BATCH_MAX: usize = 8;
pub const BATCH_STAGGER_MS: u32 = 80;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkleLook {
    pub large: bool,
    pub white: bool,
    pub left_pct: f64,
    pub top_pct: f64,
    pub duration_s: f64,
}

impl SparkleLook {
    pub fn class_name(&self) -> String {
        let mut class = String::from("sparkle");
        if self.large {
            class.push_str(" sparkle--large");
        }
        if self.white {
            class.push_str(" sparkle--white");
        }
        class
    }

    pub fn style(&self) -> String {
        format!(
            "left: {}%; top: {}%; animation-duration: {}s;",
            self.left_pct, self.top_pct, self.duration_s
        )
    }
}

/// Caps live sparkles and owns the random source. The source survives the
/// hero leaving and re-entering the viewport.
#[derive(Clone, Debug)]
pub struct SparklePool {
    max: usize,
    active: usize,
    rng: fastrand::Rng,
}

impl SparklePool {
    pub fn new(max: usize, seed: u64) -> Self {
        Self {
            max,
            active: 0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn try_spawn(&mut self) -> Option<SparkleLook> {
        if self.active >= self.max {
            return None;
        }
        self.active += 1;

        Some(SparkleLook {
            large: self.rng.f64() > 0.5,
            white: self.rng.f64() > 0.6,
            left_pct: self.rng.f64() * 100.0,
            top_pct: self.rng.f64() * 100.0,
            duration_s: 0.6 + self.rng.f64() * 0.5,
        })
    }

    pub fn release(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn batch_size(&mut self) -> usize {
        self.rng.usize(BATCH_MIN..=BATCH_MAX)
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnerCommand {
    Start,
    Stop,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SparkleSpawner {
    running: bool,
}

impl SparkleSpawner {
    pub fn on_visibility(&mut self, visible: bool) -> Option<SpawnerCommand> {
        match (self.running, visible) {
            (false, true) => {
                self.running = true;
                Some(SpawnerCommand::Start)
            }
            (true, false) => {
                self.running = false;
                Some(SpawnerCommand::Stop)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pool_refuses_beyond_max_until_released() {
        let mut pool = SparklePool::new(8, 7);

        for _ in 0..8 {
            assert!(pool.try_spawn().is_some());
        }
        assert_eq!(pool.try_spawn(), None);
        assert_eq!(pool.active(), 8);

        pool.release();
        assert!(pool.try_spawn().is_some());
        assert_eq!(pool.active(), 8);
    }

    #[test]
    fn release_never_underflows() {
        let mut pool = SparklePool::new(3, 1);

        pool.release();
        assert_eq!(pool.active(), 0);
    }

    #[test]
    fn specs_stay_in_range() {
        let mut pool = SparklePool::new(10_000, 42);

        for _ in 0..1_000 {
            let look = pool.try_spawn().expect("pool has room");
            assert!((0.0..100.0).contains(&look.left_pct));
            assert!((0.0..100.0).contains(&look.top_pct));
            assert!((0.6..1.1).contains(&look.duration_s));
            let size = pool.batch_size();
            assert!((BATCH_MIN..=BATCH_MAX).contains(&size));
        }
    }

    #[test]
    fn spec_renders_classes_and_style() {
        let look = SparkleLook {
            large: true,
            white: true,
            left_pct: 12.5,
            top_pct: 50.0,
            duration_s: 0.75,
        };

        assert_eq!(look.class_name(), "sparkle sparkle--large sparkle--white");
        assert_eq!(
            look.style(),
            "left: 12.5%; top: 50%; animation-duration: 0.75s;"
        );
        assert_eq!(
            SparkleLook {
                large: false,
                white: false,
                ..look
            }
            .class_name(),
            "sparkle"
        );
    }

    #[test]
    fn spawner_starts_once_and_stops_on_exit() {
        let mut spawner = SparkleSpawner::default();

        assert_eq!(spawner.on_visibility(true), Some(SpawnerCommand::Start));
        assert_eq!(spawner.on_visibility(true), None);
        assert_eq!(spawner.on_visibility(false), Some(SpawnerCommand::Stop));
        assert_eq!(spawner.on_visibility(false), None);
        assert_eq!(spawner.on_visibility(true), Some(SpawnerCommand::Start));
    }

    #[test]
    fn random_state_continues_across_reentry() {
        let mut continuous = SparklePool::new(100, 9);
        let mut paused = SparklePool::new(100, 9);
        let mut spawner = SparkleSpawner::default();

        let expected: Vec<_> = (0..6).filter_map(|_| continuous.try_spawn()).collect();

        spawner.on_visibility(true);
        let mut seen: Vec<_> = (0..3).filter_map(|_| paused.try_spawn()).collect();
        spawner.on_visibility(false);
        spawner.on_visibility(true);
        seen.extend((0..3).filter_map(|_| paused.try_spawn()));

        assert_eq!(seen, expected);
    }

    proptest! {
        #[test]
        fn live_count_never_exceeds_max(
            max in 1usize..16,
            ops in proptest::collection::vec(any::<bool>(), 0..200),
        ) {
            let mut pool = SparklePool::new(max, 3);
            for spawn in ops {
                if spawn {
                    let batch = pool.batch_size();
                    for _ in 0..batch {
                        pool.try_spawn();
                    }
                } else {
                    pool.release();
                }
                prop_assert!(pool.active() <= pool.max());
            }
        }
    }
}
