use crate::api::types::ElementId;

/// One intersection observation for a watched element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Visible fraction of the element, 0.0 to 1.0.
    pub ratio: f32,
}

impl IntersectionEntry {
    /// Whether at least `threshold` of the element is visible.
    pub fn reaches(&self, threshold: f32) -> bool {
        self.ratio >= threshold
    }
}

/// Page signals the effects react to. Both kinds are applied as soon as the
/// host delivers them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// The pointer moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The intersection engine reported a threshold crossing.
    Intersection(IntersectionEntry),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let entry = |ratio| IntersectionEntry { target: ElementId(0), ratio };
        assert!(entry(0.15).reaches(0.15));
        assert!(entry(1.0).reaches(0.15));
        assert!(!entry(0.149).reaches(0.15));
        assert!(entry(0.0).reaches(0.0));
    }
}
