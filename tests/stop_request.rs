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

#![cfg(test)]
//! Stop requests must end a call cleanly: no cut, and every byte allocated
//! by the separator is given back. This file holds a single test because the
//! allocation counter is global to the test binary.
mod common;

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use oddcycle::*;

use common::*;

struct Counting;

thread_local! {
    static NET: Cell<isize> = const { Cell::new(0) };
}

fn track(delta: isize) {
    let _ = NET.try_with(|net| net.set(net.get() + delta));
}

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        track(layout.size() as isize);
        System.alloc(layout)
    }
    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        track(-(layout.size() as isize));
        System.dealloc(ptr, layout)
    }
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        track(new_size as isize - layout.size() as isize);
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static ALLOCATOR: Counting = Counting;

fn net_allocation_of<F: FnOnce()>(f: F) -> isize {
    let before = NET.with(|net| net.get());
    f();
    NET.with(|net| net.get()) - before
}

#[test]
fn stop_requests_end_the_call_without_leaking() {
    for method in [Method::Classical, Method::LevelGraph] {
        for stop_after in [0, 2] {
            let mut solver = Solver::cycle(5, 0.5);
            solver.stop_after = Some(stop_after);
            let mut separator = separator(method, SeparatorConfig::default());

            let mut outcome = Outcome::DidNotRun;
            let net = net_allocation_of(|| outcome = separator.separate(&mut solver));

            assert_eq!(Outcome::DidNotFind, outcome);
            assert!(solver.cuts.is_empty());
            assert!(solver.fixings.is_empty());
            assert_eq!(0, net);
        }
    }
}
