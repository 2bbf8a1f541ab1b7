const RATIO_TOLERANCE: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inset {
    Px(f64),
    Percent(f64),
}

impl Inset {
    fn to_css(self) -> String {
        match self {
            Self::Px(value) => format!("{value}px"),
            Self::Percent(value) => format!("{value}%"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    pub top: Inset,
    pub right: Inset,
    pub bottom: Inset,
    pub left: Inset,
}

impl RootMargin {
    pub const ZERO: Self = Self {
        top: Inset::Px(0.0),
        right: Inset::Px(0.0),
        bottom: Inset::Px(0.0),
        left: Inset::Px(0.0),
    };

    /// Collapses the viewport to its horizontal centre line.
    pub const CENTER_LINE: Self = Self {
        top: Inset::Percent(-50.0),
        right: Inset::Px(0.0),
        bottom: Inset::Percent(-50.0),
        left: Inset::Px(0.0),
    };

    pub fn to_css(self) -> String {
        format!(
            "{} {} {} {}",
            self.top.to_css(),
            self.right.to_css(),
            self.bottom.to_css(),
            self.left.to_css()
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::ZERO,
            threshold: 0.0,
        }
    }
}

impl ObserverOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    pub fn center_band() -> Self {
        Self {
            root_margin: RootMargin::CENTER_LINE,
            threshold: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visibility {
    pub intersecting: bool,
    pub ratio: f64,
}

impl Visibility {
    pub fn entered(self, threshold: f64) -> bool {
        self.intersecting && self.ratio + RATIO_TOLERANCE >= threshold
    }
}

#[derive(Debug)]
pub struct OnceSubscription<T> {
    armed: Vec<T>,
    threshold: f64,
}

impl<T: PartialEq> OnceSubscription<T> {
    pub fn new(targets: Vec<T>, threshold: f64) -> Self {
        Self {
            armed: targets,
            threshold,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    #[cfg(test)]
    fn armed(&self) -> usize {
        self.armed.len()
    }

    /// Entered targets in entry order. Each is disarmed on return.
    pub fn deliver<I>(&mut self, entries: I) -> Vec<T>
    where
        I: IntoIterator<Item = (T, Visibility)>,
    {
        let mut fired = Vec::new();

        for (target, visibility) in entries {
            if !visibility.entered(self.threshold) {
                continue;
            }

            if let Some(index) = self.armed.iter().position(|armed| *armed == target) {
                self.armed.swap_remove(index);
                fired.push(target);
            }
        }

        fired
    }
}
