use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{CatalogEntry, ExerciseCatalog};

/// Draws exercises from a shuffled copy of the catalog. No name repeats until
/// every name has been drawn once, at which point the pool is reshuffled.
pub struct ExerciseSelector<'c> {
    catalog: &'c ExerciseCatalog,
    pool: Vec<&'c CatalogEntry>,
    refreshes: usize,
}

impl<'c> ExerciseSelector<'c> {
    pub fn new<R: Rng + ?Sized>(catalog: &'c ExerciseCatalog, rng: &mut R) -> Self {
        let mut selector = Self {
            catalog,
            pool: Vec::with_capacity(catalog.len()),
            refreshes: 0,
        };
        selector.shuffle_pool(rng);
        selector
    }

    /// Next exercise, refilling the pool first when it is exhausted.
    pub fn take<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'c CatalogEntry {
        if self.pool.is_empty() {
            self.shuffle_pool(rng);
            self.refreshes += 1;
        }
        // A refilled pool holds every catalog entry.
        let catalog = self.catalog;
        self.pool.pop().unwrap_or_else(|| catalog.first())
    }

    /// How many times the pool has been refilled after the initial shuffle.
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    fn shuffle_pool<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let catalog = self.catalog;
        self.pool.clear();
        self.pool.extend(catalog.entries());
        self.pool.shuffle(rng);
    }
}
