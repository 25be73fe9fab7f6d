// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

//! Index-addressed arena with an intrusive free list.
//!
//! Tree nodes and label cells are stored here instead of behind individual
//! boxes. Released slots are chained into a free list and handed out again
//! before the backing vector grows, so releasing never allocates.

use std::mem;
use std::ops::{Index, IndexMut};

use crate::GraphError;

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

#[derive(Debug, Clone)]
pub(crate) struct Pool<T> {
    name: &'static str,
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    vacant: usize,
}

impl<T> Pool<T> {
    /// Make an empty pool; `name` shows up in allocation errors.
    pub(crate) const fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: Vec::new(),
            free: None,
            vacant: 0,
        }
    }

    /// Number of occupied slots.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.vacant
    }

    /// Make sure the next `extra` calls to [`Pool::alloc`] succeed without
    /// touching the allocator.
    pub(crate) fn reserve(&mut self, extra: usize) -> Result<(), GraphError> {
        if extra > self.vacant {
            self.slots
                .try_reserve(extra - self.vacant)
                .map_err(|_| GraphError::OutOfMemory(self.name))?;
        }
        Ok(())
    }

    /// Store `value`, reusing a released slot if there is one.
    pub(crate) fn alloc(&mut self, value: T) -> Result<usize, GraphError> {
        if let Some(id) = self.free {
            let next = match self.slots[id] {
                Slot::Vacant(next) => next,
                Slot::Occupied(_) => panic!("slot {id} of {} is on the free list", self.name),
            };
            self.slots[id] = Slot::Occupied(value);
            self.free = next;
            self.vacant -= 1;
            return Ok(id);
        }
        self.slots
            .try_reserve(1)
            .map_err(|_| GraphError::OutOfMemory(self.name))?;
        self.slots.push(Slot::Occupied(value));
        Ok(self.slots.len() - 1)
    }

    /// Take the value out of slot `id` and put the slot on the free list.
    pub(crate) fn release(&mut self, id: usize) -> T {
        match mem::replace(&mut self.slots[id], Slot::Vacant(self.free)) {
            Slot::Occupied(value) => {
                self.free = Some(id);
                self.vacant += 1;
                value
            }
            Slot::Vacant(_) => panic!("slot {id} of {} released twice", self.name),
        }
    }
}

impl<T> Index<usize> for Pool<T> {
    type Output = T;

    fn index(&self, id: usize) -> &T {
        match &self.slots[id] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => panic!("slot {id} of {} is vacant", self.name),
        }
    }
}

impl<T> IndexMut<usize> for Pool<T> {
    fn index_mut(&mut self, id: usize) -> &mut T {
        match &mut self.slots[id] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => panic!("slot {id} of {} is vacant", self.name),
        }
    }
}
