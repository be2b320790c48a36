//! Id-keyed character cache shared by detail lookups.
//!
//! Unbounded with no eviction or expiry: the public catalog holds a few
//! hundred characters and never changes them. Reusing this against a large
//! or mutable catalog would grow without limit and serve stale records.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::types::Character;

#[derive(Debug, Default)]
pub struct CharacterCache {
    entries: Mutex<HashMap<u32, Character>>,
}

impl CharacterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u32) -> Option<Character> {
        self.lock().get(&id).cloned()
    }

    pub fn put(&self, id: u32, character: Character) {
        self.lock().insert(id, character);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Entries are whole values, so a panic mid-insert cannot leave one torn.
    fn lock(&self) -> MutexGuard<'_, HashMap<u32, Character>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
