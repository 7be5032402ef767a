use std::cell::Cell;
use std::rc::Rc;

/// Counter bumped by every source attach.
///
/// Asynchronous continuations capture a [`GenerationToken`] before they
/// suspend and check it afterwards; a token from an older attach is stale and
/// must not touch the surface or the UI.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: Rc<Cell<u64>>,
}

impl Generation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every outstanding token.
    pub fn advance(&self) -> GenerationToken {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        self.token()
    }

    /// Token for the generation in effect now.
    #[must_use]
    pub fn token(&self) -> GenerationToken {
        GenerationToken {
            value: self.current.get(),
            current: Rc::clone(&self.current),
        }
    }
}

/// Snapshot of a [`Generation`] at a point in time.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    value: u64,
    current: Rc<Cell<u64>>,
}

impl GenerationToken {
    /// Whether no attach has happened since this token was taken.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.get() == self.value
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl PartialEq for GenerationToken {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && Rc::ptr_eq(&self.current, &other.current)
    }
}

impl Eq for GenerationToken {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_invalidates_old_tokens() {
        let generation = Generation::new();
        let first = generation.advance();
        assert!(first.is_current());

        let second = generation.advance();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_ne!(first, second);
        assert_eq!(second, generation.token());
    }

    #[test]
    fn test_tokens_from_different_counters_differ() {
        let a = Generation::new();
        let b = Generation::new();
        assert_ne!(a.token(), b.token());
    }
}
