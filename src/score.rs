/// Score bookkeeping with an eased value for display.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    score: u32,
    best: u32,
    display: u32,
    display_best: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, n: u32) {
        self.score = self.score.saturating_add(n);
    }

    /// Only the last-ball respawn resets the score.
    #[inline]
    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Once per frame: eases the display value one unit toward the score
    /// and samples both maxima.
    pub fn tick(&mut self) {
        if self.display < self.score {
            self.display += 1;
        } else if self.display > self.score {
            self.display -= 1;
        }

        self.best = self.best.max(self.score);
        self.display_best = self.display_best.max(self.display);
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn best(&self) -> u32 {
        self.best
    }

    #[inline]
    pub fn display(&self) -> u32 {
        self.display
    }

    #[inline]
    pub fn display_best(&self) -> u32 {
        self.display_best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_converges_without_overshoot() {
        let mut score = ScoreTracker::new();
        score.add(5);

        for frame in 1..=5 {
            score.tick();
            assert_eq!(score.display(), frame);
        }
        score.tick();
        assert_eq!(score.display(), 5);

        score.reset();
        for frame in 1..=5 {
            score.tick();
            assert_eq!(score.display(), 5 - frame);
        }
        score.tick();
        assert_eq!(score.display(), 0);
    }

    #[test]
    fn test_best_is_monotonic() {
        let mut score = ScoreTracker::new();
        let mut prev_best = 0;
        let mut prev_display_best = 0;

        for i in 0..50 {
            if i % 7 == 0 {
                score.reset();
            } else {
                score.add(i % 3);
            }
            score.tick();

            assert!(score.best() >= prev_best);
            assert!(score.display_best() >= prev_display_best);
            assert!(score.best() >= score.score());
            prev_best = score.best();
            prev_display_best = score.display_best();
        }
    }
}
