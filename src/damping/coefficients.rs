use serde::{Deserialize, Serialize};

use crate::damping::law::Gammas;
use crate::error::ConfigError;

/// Per-type override: coefficients of `kind` become `base * factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeScale {
    pub kind: usize,
    pub factor: f64,
}

impl TypeScale {
    pub fn new(kind: usize, factor: f64) -> Self {
        Self { kind, factor }
    }
}

/// Linear and angular damping coefficients indexed by particle type.
///
/// Types are 1-based: entry `kind - 1` holds the pair of type `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCoefficients {
    base: Gammas,
    table: Vec<Gammas>,
}

impl TypeCoefficients {
    pub fn uniform(ntypes: usize, base: Gammas) -> Self {
        Self {
            base,
            table: vec![base; ntypes],
        }
    }

    /// Builds the table from a base pair and a list of overrides. A type named twice
    /// keeps the last factor.
    pub fn with_scales(
        modifier: &str,
        ntypes: usize,
        base: Gammas,
        scales: &[TypeScale],
    ) -> Result<Self, ConfigError> {
        let mut table = Self::uniform(ntypes, base);
        for scale in scales {
            table.scale(modifier, *scale)?;
        }
        Ok(table)
    }

    pub fn scale(&mut self, modifier: &str, scale: TypeScale) -> Result<(), ConfigError> {
        let ntypes = self.ntypes();
        let slot = scale
            .kind
            .checked_sub(1)
            .and_then(|i| self.table.get_mut(i))
            .ok_or_else(|| ConfigError::TypeOutOfRange {
                modifier: modifier.to_string(),
                kind: scale.kind,
                ntypes,
            })?;
        *slot = Gammas::new(
            self.base.linear * scale.factor,
            self.base.angular * scale.factor,
        );
        Ok(())
    }

    pub fn ntypes(&self) -> usize {
        self.table.len()
    }

    /// Coefficients of type `kind`, or `None` outside `1..=ntypes`.
    #[inline]
    pub fn get(&self, kind: usize) -> Option<Gammas> {
        kind.checked_sub(1).and_then(|i| self.table.get(i)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_only_touches_named_type() {
        let table =
            TypeCoefficients::with_scales("d", 3, Gammas::new(0.4, 0.2), &[TypeScale::new(2, 3.0)])
                .unwrap();
        assert_eq!(table.get(1), Some(Gammas::new(0.4, 0.2)));
        assert_eq!(table.get(3), Some(Gammas::new(0.4, 0.2)));
        let scaled = table.get(2).unwrap();
        assert!((scaled.linear - 1.2).abs() < 1e-12);
        assert!((scaled.angular - 0.6).abs() < 1e-12);
    }

    #[test]
    fn repeated_override_replaces_instead_of_compounding() {
        let scales = [TypeScale::new(1, 2.0), TypeScale::new(1, 5.0)];
        let table = TypeCoefficients::with_scales("d", 1, Gammas::new(1.0, 0.5), &scales).unwrap();
        assert_eq!(table.get(1), Some(Gammas::new(5.0, 2.5)));
    }

    #[test]
    fn out_of_range_types_are_rejected() {
        for kind in [0, 4] {
            let err = TypeCoefficients::with_scales(
                "damp1",
                3,
                Gammas::new(1.0, 1.0),
                &[TypeScale::new(kind, 2.0)],
            )
            .unwrap_err();
            assert_eq!(
                err,
                ConfigError::TypeOutOfRange {
                    modifier: "damp1".into(),
                    kind,
                    ntypes: 3
                }
            );
        }
    }

    #[test]
    fn lookup_outside_type_range_is_none() {
        let table = TypeCoefficients::uniform(2, Gammas::new(0.5, 0.5));
        assert_eq!(table.get(0), None);
        assert_eq!(table.get(3), None);
        assert_eq!(table.get(2), Some(Gammas::new(0.5, 0.5)));
    }
}
