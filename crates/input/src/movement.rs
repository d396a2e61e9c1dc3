use crate::action::Movement;

/// Set of movement directions whose keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementSet {
    bits: u8,
}

impl MovementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, movement: Movement) {
        self.bits |= movement.bit();
    }

    pub fn remove(&mut self, movement: Movement) {
        self.bits &= !movement.bit();
    }

    /// Record a key transition: held on press, released otherwise.
    pub fn set(&mut self, movement: Movement, held: bool) {
        if held {
            self.insert(movement);
        } else {
            self.remove(movement);
        }
    }

    pub fn contains(&self, movement: Movement) -> bool {
        self.bits & movement.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Held movements in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Movement> + '_ {
        Movement::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl FromIterator<Movement> for MovementSet {
    fn from_iter<I: IntoIterator<Item = Movement>>(iter: I) -> Self {
        let mut set = Self::new();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        let set = MovementSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn press_and_release() {
        let mut set = MovementSet::new();
        set.set(Movement::Forward, true);
        set.set(Movement::StrafeRight, true);
        assert!(set.contains(Movement::Forward));
        assert!(set.contains(Movement::StrafeRight));
        assert!(!set.contains(Movement::Backward));
        assert_eq!(set.len(), 2);

        set.set(Movement::Forward, false);
        assert!(!set.contains(Movement::Forward));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut set = MovementSet::new();
        set.insert(Movement::Ascend);
        set.insert(Movement::Ascend);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn opposite_directions_can_both_be_held() {
        let set: MovementSet = [Movement::Forward, Movement::Backward].into_iter().collect();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Movement::Forward, Movement::Backward]
        );
    }

    #[test]
    fn clear_releases_all() {
        let mut set: MovementSet = Movement::ALL.into_iter().collect();
        assert_eq!(set.len(), 6);
        set.clear();
        assert!(set.is_empty());
    }
}
