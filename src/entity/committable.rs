use crate::store::{RepositoryError, Tables};

/// An aggregate the store knows how to write into its tables.
pub trait Persist {
    /// Write pending changes into the staged tables of a transaction.
    fn persist(&self, tables: &mut Tables) -> Result<(), RepositoryError>;

    /// Called once the transaction that ran [`Persist::persist`] is published.
    fn mark_committed(&mut self);
}

/// Trait for types that can be committed to the store in one transaction.
pub trait Committable {
    /// Returns mutable references to every aggregate to be committed.
    fn persistables(&mut self) -> Vec<&mut dyn Persist>;
}

// Single aggregate
impl<P: Persist> Committable for P {
    fn persistables(&mut self) -> Vec<&mut dyn Persist> {
        vec![self]
    }
}

// Slice of mutable aggregate references
impl<'a> Committable for [&'a mut dyn Persist] {
    fn persistables(&mut self) -> Vec<&mut dyn Persist> {
        self.iter_mut().map(|p| &mut **p as &mut dyn Persist).collect()
    }
}

// Fixed-size arrays for common cases
impl<'a, const N: usize> Committable for [&'a mut dyn Persist; N] {
    fn persistables(&mut self) -> Vec<&mut dyn Persist> {
        self.iter_mut().map(|p| &mut **p as &mut dyn Persist).collect()
    }
}

// Vec of mutable aggregate references
impl<'a> Committable for Vec<&'a mut dyn Persist> {
    fn persistables(&mut self) -> Vec<&mut dyn Persist> {
        self.iter_mut().map(|p| &mut **p as &mut dyn Persist).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker {
        committed: bool,
    }

    impl Persist for Marker {
        fn persist(&self, _tables: &mut Tables) -> Result<(), RepositoryError> {
            Ok(())
        }

        fn mark_committed(&mut self) {
            self.committed = true;
        }
    }

    #[test]
    fn single_aggregate() {
        let mut marker = Marker { committed: false };
        let items = marker.persistables();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn array_of_aggregates() {
        let mut a = Marker { committed: false };
        let mut b = Marker { committed: false };
        let mut batch: [&mut dyn Persist; 2] = [&mut a, &mut b];
        for item in batch.persistables() {
            item.mark_committed();
        }
        assert!(a.committed);
        assert!(b.committed);
    }

    #[test]
    fn vec_of_aggregates() {
        let mut a = Marker { committed: false };
        let mut b = Marker { committed: false };
        let mut c = Marker { committed: false };
        let mut batch: Vec<&mut dyn Persist> = vec![&mut a, &mut b, &mut c];
        assert_eq!(batch.persistables().len(), 3);
    }
}
