// Copyright (c) 2025 vivo Mobile Communication Co., Ltd.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Word-wide access to memory-mapped device registers.
//!
//! Drivers never dereference device addresses themselves; they hold a
//! [`RegisterIo`] capability and go through it for every register access.
//! [`Mmio`] backs it with volatile loads and stores on real hardware.

use core::ptr::{read_volatile, write_volatile};

#[cfg(any(test, feature = "simulator"))]
pub mod simulator;

/// A 32-bit register access path over absolute physical addresses.
pub trait RegisterIo {
    fn read32(&self, address: usize) -> u32;
    fn write32(&self, address: usize, value: u32);
}

impl<T: RegisterIo + ?Sized> RegisterIo for &T {
    #[inline]
    fn read32(&self, address: usize) -> u32 {
        (**self).read32(address)
    }

    #[inline]
    fn write32(&self, address: usize, value: u32) {
        (**self).write32(address, value)
    }
}

/// Volatile memory-mapped I/O.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Creates the volatile access path.
    ///
    /// # Safety
    ///
    /// Every address later passed to [`RegisterIo::read32`] or
    /// [`RegisterIo::write32`] must be a 4-byte aligned register of a device
    /// that is mapped into the address space as device memory. The firmware
    /// runs with a flat identity mapping, so the physical addresses from the
    /// platform memory map satisfy this.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterIo for Mmio {
    #[inline]
    fn read32(&self, address: usize) -> u32 {
        // SAFETY: the creator of `Mmio` guarantees `address` is a mapped, aligned register.
        unsafe { read_volatile(address as *const u32) }
    }

    #[inline]
    fn write32(&self, address: usize, value: u32) {
        // SAFETY: the creator of `Mmio` guarantees `address` is a mapped, aligned register.
        unsafe { write_volatile(address as *mut u32, value) }
    }
}
