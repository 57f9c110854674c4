//! Fixed-size entity pools with generational handles

/// Stable reference to a pool slot. A handle goes stale once its slot is
/// released, even if the slot is later reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    active: bool,
    value: T,
}

/// Pre-allocated set of reusable entities. Acquiring takes the first inactive
/// slot; when none is free the request fails and nothing is allocated.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
}

impl<T: Default> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity)
                .map(|_| Slot {
                    generation: 0,
                    active: false,
                    value: T::default(),
                })
                .collect(),
        }
    }
}

impl<T> Pool<T> {
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Activate the first free slot, initialising it with `value`
    pub fn acquire(&mut self, value: T) -> Option<Handle> {
        let index = self.slots.iter().position(|s| !s.active)?;
        let slot = &mut self.slots[index];
        slot.active = true;
        slot.value = value;
        Some(Handle {
            index: index as u32,
            generation: slot.generation,
        })
    }

    /// Deactivate the slot behind `handle`. Returns false for stale handles.
    pub fn release(&mut self, handle: Handle) -> bool {
        match self.slots.get_mut(handle.index()) {
            Some(slot) if slot.active && slot.generation == handle.generation => {
                slot.active = false;
                slot.generation = slot.generation.wrapping_add(1);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index())
            .filter(|s| s.active && s.generation == handle.generation)
            .map(|s| &s.value)
    }

    /// Active entities with their handles
    pub fn iter_active(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.active).map(|(i, s)| {
            (
                Handle {
                    index: i as u32,
                    generation: s.generation,
                },
                &s.value,
            )
        })
    }

    /// Release every active entity for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            if !keep(&mut slot.value) {
                slot.active = false;
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
    }
}
