//! Generational handle table for engines owned across the C boundary.
//!
//! A handle packs `(generation << 32) | (slot + 1)`, so 0 is never a
//! live handle. Removing an entry bumps the slot's generation; every
//! older handle for that slot then misses instead of reaching a new
//! occupant.

const SLOT_BITS: u32 = 32;

fn pack(slot: u32, generation: u32) -> u64 {
    (u64::from(generation) << SLOT_BITS) | (u64::from(slot) + 1)
}

fn unpack(handle: u64) -> Option<(usize, u32)> {
    let low = handle as u32;
    let slot = low.checked_sub(1)?;
    Some((slot as usize, (handle >> SLOT_BITS) as u32))
}

enum Entry<T> {
    Live { generation: u32, value: T },
    Free { generation: u32, next: Option<u32> },
    Retired,
}

/// Slab of values addressed by generational `u64` handles.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<u32>,
    live: usize,
}

impl<T> HandleTable<T> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            live: 0,
        }
    }

    /// Store `value`, reusing a freed slot when one exists.
    pub fn insert(&mut self, value: T) -> u64 {
        self.live += 1;
        if let Some(slot) = self.free_head {
            if let Some(entry) = self.entries.get_mut(slot as usize) {
                if let Entry::Free { generation, next } = *entry {
                    self.free_head = next;
                    *entry = Entry::Live { generation, value };
                    return pack(slot, generation);
                }
            }
        }
        let slot = self.entries.len() as u32;
        self.entries.push(Entry::Live {
            generation: 0,
            value,
        });
        pack(slot, 0)
    }

    pub fn get(&self, handle: u64) -> Option<&T> {
        let (slot, want) = unpack(handle)?;
        match self.entries.get(slot)? {
            Entry::Live { generation, value } if *generation == want => Some(value),
            _ => None,
        }
    }

    /// Take the value out; stale or unknown handles yield `None`.
    ///
    /// A slot whose generation would wrap is retired rather than reused.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let (slot, want) = unpack(handle)?;
        let entry = self.entries.get_mut(slot)?;
        match entry {
            Entry::Live { generation, .. } if *generation == want => {}
            _ => return None,
        }
        let replacement = match want.checked_add(1) {
            Some(generation) => Entry::Free {
                generation,
                next: self.free_head,
            },
            None => Entry::Retired,
        };
        let old = std::mem::replace(entry, replacement);
        if let Entry::Free { .. } = self.entries[slot] {
            self.free_head = Some(slot as u32);
        }
        self.live -= 1;
        match old {
            Entry::Live { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Number of live entries.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.live
    }
}
