use crate::schedule::integrator::IntegrationStyle;

/// Level binding of a modifier, resolved from the active integration style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    #[default]
    SingleRate,
    MultiRate {
        level: usize,
        outermost: usize,
    },
    Minimizing,
}

impl Schedule {
    /// Binds to the outermost level unless `requested` names one, which is clamped
    /// to `[0, outermost]`.
    pub fn resolve(style: IntegrationStyle, requested: Option<usize>) -> Self {
        match style {
            IntegrationStyle::SingleRate => Schedule::SingleRate,
            IntegrationStyle::Minimizer => Schedule::Minimizing,
            IntegrationStyle::MultiRate { levels } => {
                let outermost = levels.saturating_sub(1);
                let level = requested.map_or(outermost, |l| l.min(outermost));
                Schedule::MultiRate { level, outermost }
            }
        }
    }

    pub fn bound_level(&self) -> Option<usize> {
        match self {
            Schedule::MultiRate { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// True when a level hook for `level` must run the damping pass.
    #[inline]
    pub fn applies_at(&self, level: usize) -> bool {
        self.bound_level() == Some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_rate_defaults_to_outermost_level() {
        let schedule = Schedule::resolve(IntegrationStyle::MultiRate { levels: 4 }, None);
        assert_eq!(schedule, Schedule::MultiRate { level: 3, outermost: 3 });
        assert!(schedule.applies_at(3));
        assert!(!schedule.applies_at(0));
    }

    #[test]
    fn explicit_level_is_clamped() {
        let style = IntegrationStyle::MultiRate { levels: 3 };
        assert_eq!(Schedule::resolve(style, Some(1)).bound_level(), Some(1));
        assert_eq!(Schedule::resolve(style, Some(0)).bound_level(), Some(0));
        assert_eq!(Schedule::resolve(style, Some(12)).bound_level(), Some(2));
    }

    #[test]
    fn single_rate_and_minimization_ignore_levels() {
        let single = Schedule::resolve(IntegrationStyle::SingleRate, Some(2));
        assert_eq!(single, Schedule::SingleRate);
        assert!(!single.applies_at(0));

        let min = Schedule::resolve(IntegrationStyle::Minimizer, None);
        assert_eq!(min, Schedule::Minimizing);
        assert_eq!(min.bound_level(), None);
    }
}
