use std::cmp::Ordering;

/// Selection priority shared by sign mappings and grammar rules.
///
/// Orders by weight descending, then by a stable identifier ascending, so
/// that sorting ascending by `Priority` puts the preferred entry first and
/// ties never depend on storage order.
///
/// # Example
///
/// ```
/// use signterp::Priority;
///
/// let mut entries = vec![Priority::new(1, 7), Priority::new(5, 9), Priority::new(5, 2)];
/// entries.sort();
/// assert_eq!(entries, vec![Priority::new(5, 2), Priority::new(5, 9), Priority::new(1, 7)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Priority {
    pub weight: i32,
    pub id: u32,
}

impl Priority {
    pub fn new(weight: i32, id: u32) -> Self {
        Self { weight, id }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
