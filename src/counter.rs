/// Ease-out quartic: fast start, slow finish.
pub fn ease_out_quart(progress: f64) -> f64 {
    let progress = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - progress).powi(4)
}

/// Reads the integer prefix of a `data-target` value, so `"150+"` counts to 150.
pub fn parse_target(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(index, _)| index)
        .unwrap_or(digits.len());

    digits[..end].parse().ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u64,
    pub done: bool,
}

#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: u64,
    duration_ms: f64,
    started_at: f64,
    displayed: u64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: f64, started_at: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at,
            displayed: 0,
            done: false,
        }
    }

    pub fn progress_at(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }

        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Displayed values never go down; the final frame shows exactly `target`.
    pub fn tick(&mut self, now: f64) -> CounterFrame {
        if self.done {
            return CounterFrame {
                value: self.target,
                done: true,
            };
        }

        let progress = self.progress_at(now);
        if progress >= 1.0 {
            self.displayed = self.target;
            self.done = true;
        } else {
            let eased = (self.target as f64 * ease_out_quart(progress)).floor() as u64;
            self.displayed = self.displayed.max(eased.min(self.target));
        }

        CounterFrame {
            value: self.displayed,
            done: self.done,
        }
    }

    /// Jumps straight to the target, used when motion is reduced.
    pub fn finish(&mut self) -> CounterFrame {
        self.displayed = self.target;
        self.done = true;
        CounterFrame {
            value: self.target,
            done: true,
        }
    }
}
