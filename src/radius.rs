//! Mapping from aggregated totals to glyph radii in map units.

/// Glyph radius bounds as fractions of the larger map span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusFractions {
    pub min: f64,
    pub max: f64,
}

impl RadiusFractions {
    /// Generator networks are dense, so glyphs stay small.
    pub const GENERATORS: RadiusFractions = RadiusFractions {
        min: 0.005,
        max: 0.05,
    };
    /// Storage sits at fewer buses and gets larger glyphs.
    pub const STORAGE: RadiusFractions = RadiusFractions {
        min: 0.003,
        max: 0.1,
    };
}

/// `clamp(total / reference * max_r, min_r, max_r)`.
///
/// `reference` must be positive and `min_r <= max_r`.
pub fn radius(total: f64, reference: f64, min_r: f64, max_r: f64) -> f64 {
    (total / reference * max_r).clamp(min_r, max_r)
}

/// Largest positive total, or the caller's override when one is given.
pub fn resolve_reference<I>(size_reference: Option<f64>, totals: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    if let Some(reference) = size_reference {
        return Some(reference);
    }
    totals
        .into_iter()
        .filter(|total| *total > 0.0)
        .fold(None, |acc: Option<f64>, total| {
            Some(acc.map_or(total, |max| max.max(total)))
        })
}

/// One radius mapping, shared by the glyphs and the size legend of a map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusScale {
    reference: f64,
    min_r: f64,
    max_r: f64,
}

impl RadiusScale {
    /// Returns `None` unless `reference` is a positive finite number.
    pub fn new(reference: f64, min_r: f64, max_r: f64) -> Option<Self> {
        if !(reference.is_finite() && reference > 0.0) {
            return None;
        }
        Some(Self {
            reference,
            min_r: min_r.min(max_r),
            max_r,
        })
    }

    /// Bounds derived from the larger of the two map spans.
    pub fn for_span(reference: f64, span: f64, fractions: RadiusFractions) -> Option<Self> {
        Self::new(reference, fractions.min * span, fractions.max * span)
    }

    pub fn radius(&self, total: f64) -> f64 {
        radius(total, self.reference, self.min_r, self.max_r)
    }

    pub fn reference(&self) -> f64 {
        self.reference
    }

    pub fn min_radius(&self) -> f64 {
        self.min_r
    }

    pub fn max_radius(&self) -> f64 {
        self.max_r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_is_bounded_and_monotonic() {
        let scale = RadiusScale::new(20.0, 0.5, 5.0).unwrap();
        let mut last = 0.0;
        for step in 0..=100 {
            let total = step as f64;
            let r = scale.radius(total);
            assert!((0.5..=5.0).contains(&r), "radius {r} out of bounds");
            assert!(r >= last);
            last = r;
        }
        assert_eq!(scale.radius(0.0), 0.5);
        assert_eq!(scale.radius(20.0), 5.0);
        assert_eq!(scale.radius(10.0), 2.5);
        // clamped, not extrapolated
        assert_eq!(scale.radius(1e9), 5.0);
    }

    #[test]
    fn test_scale_from_span() {
        let scale = RadiusScale::for_span(10.0, 20.0, RadiusFractions::GENERATORS).unwrap();
        assert!((scale.min_radius() - 0.1).abs() < 1e-12);
        assert!((scale.max_radius() - 1.0).abs() < 1e-12);
        let scale = RadiusScale::for_span(10.0, 20.0, RadiusFractions::STORAGE).unwrap();
        assert!((scale.max_radius() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_reference() {
        assert!(RadiusScale::new(0.0, 0.1, 1.0).is_none());
        assert!(RadiusScale::new(-3.0, 0.1, 1.0).is_none());
        assert!(RadiusScale::new(f64::NAN, 0.1, 1.0).is_none());
    }

    #[test]
    fn test_resolve_reference() {
        assert_eq!(resolve_reference(None, [15.0, 20.0, 0.0]), Some(20.0));
        assert_eq!(resolve_reference(Some(100.0), [15.0, 20.0]), Some(100.0));
        assert_eq!(resolve_reference(None, [0.0, -1.0]), None);
        assert_eq!(resolve_reference(None, Vec::new()), None);
    }
}
