// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module keeps track of the memory used by the graphs built during one
//! separation attempt. All the arc buffers of a graph grow by doubling their
//! capacity, and each growth must first be granted by the `MemoryBudget` of
//! that graph. When a growth is refused, the construction is abandoned with
//! `Abort::MemoryLimit`.

use std::mem::size_of;
use std::ops::Deref;

use crate::Abort;

/// Capacity of a freshly created buffer. Kept small so that only the graphs
/// which need it pay for a large allocation.
const INITIAL_CAPACITY: usize = 16;

/// The memory ceiling of one graph (and its searches).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBudget {
    /// Maximum number of bytes (`None` means unbounded)
    limit: Option<usize>,
    /// Number of bytes granted so far
    used: usize,
}
impl MemoryBudget {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit, used: 0 }
    }
    pub fn unbounded() -> Self {
        Self::new(None)
    }
    /// Number of bytes granted so far
    pub fn used(&self) -> usize {
        self.used
    }
    /// Grants `bytes` more bytes unless that would exceed the limit
    pub fn reserve(&mut self, bytes: usize) -> Result<(), Abort> {
        if let Some(limit) = self.limit {
            let available = limit.saturating_sub(self.used);
            if bytes > available {
                return Err(Abort::MemoryLimit { requested: bytes, available });
            }
        }
        self.used += bytes;
        Ok(())
    }
    /// Grants the memory needed by an array of `len` items of type `T`
    pub fn reserve_array<T>(&mut self, len: usize) -> Result<(), Abort> {
        self.reserve(len.saturating_mul(size_of::<T>()))
    }
}

/// A vector whose growth is accounted for in a `MemoryBudget`. Its capacity
/// doubles whenever it is full.
#[derive(Debug, Clone)]
pub struct GrowableBuffer<T> {
    data: Vec<T>,
}
impl <T> GrowableBuffer<T> {
    pub fn new(budget: &mut MemoryBudget) -> Result<Self, Abort> {
        budget.reserve_array::<T>(INITIAL_CAPACITY)?;
        Ok(Self { data: Vec::with_capacity(INITIAL_CAPACITY) })
    }
    /// Appends an item, doubling the capacity of the buffer first if needed
    pub fn push(&mut self, item: T, budget: &mut MemoryBudget) -> Result<(), Abort> {
        if self.data.len() == self.data.capacity() {
            let extra = self.data.capacity().max(1);
            budget.reserve_array::<T>(extra)?;
            self.data.try_reserve_exact(extra)
                .map_err(|_| Abort::MemoryLimit { requested: extra * size_of::<T>(), available: 0 })?;
        }
        self.data.push(item);
        Ok(())
    }
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }
}
impl <T> Deref for GrowableBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
