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

//! An in-memory stand-in for a DesignWare APB UART register block.
//!
//! Every access is journaled. Offsets that alias on the real device
//! (receive buffer / transmit holding / divisor latch low, interrupt enable /
//! divisor latch high) are routed the way the hardware routes them,
//! depending on LCR.DLAB. Addresses outside the UART block behave as plain
//! storage.

use super::RegisterIo;
use crate::serial::dw_uart::{DLH, DLL, IER, LCR, RBR, SRR, THR, UART_REGISTER_SPAN, USR};
use alloc::{collections::BTreeMap, collections::VecDeque, vec::Vec};
use core::cell::RefCell;

const LCR_DLAB: u32 = 1 << 7;
const SRR_RFR: u32 = 1 << 1;
const USR_TFNF: u32 = 1 << 1;
const USR_TFE: u32 = 1 << 2;
const USR_RFNE: u32 = 1 << 3;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Access {
    Read { address: usize, value: u32 },
    Write { address: usize, value: u32 },
}

impl Access {
    pub fn address(&self) -> usize {
        match *self {
            Access::Read { address, .. } | Access::Write { address, .. } => address,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    registers: BTreeMap<usize, u32>,
    divisor_low: u32,
    divisor_high: u32,
    journal: Vec<Access>,
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    tx_full_reads: usize,
    rx_empty_reads: usize,
}

#[derive(Debug)]
pub struct SimulatedRegisters {
    base: usize,
    state: RefCell<State>,
}

impl SimulatedRegisters {
    /// A UART block at `base` with every register reading zero.
    pub fn new(base: usize) -> Self {
        Self {
            base,
            state: RefCell::new(State::default()),
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Presets a register without journaling the access.
    pub fn preset(&self, address: usize, value: u32) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    /// Current content of a plain register, without journaling.
    pub fn peek(&self, address: usize) -> u32 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Divisor latch content as (low, high).
    pub fn divisor_latch(&self) -> (u32, u32) {
        let state = self.state.borrow();
        (state.divisor_low, state.divisor_high)
    }

    /// Queues bytes as if they arrived on the wire.
    pub fn receive(&self, bytes: &[u8]) {
        self.state.borrow_mut().rx.extend(bytes.iter().copied());
    }

    /// Makes the next `reads` status reads report a full transmit FIFO.
    pub fn hold_tx_full(&self, reads: usize) {
        self.state.borrow_mut().tx_full_reads = reads;
    }

    /// Makes the next `reads` status reads report an empty receive FIFO,
    /// even if bytes are queued.
    pub fn hold_rx_empty(&self, reads: usize) {
        self.state.borrow_mut().rx_empty_reads = reads;
    }

    /// Bytes written to the transmit holding register so far.
    pub fn transmitted(&self) -> Vec<u8> {
        self.state.borrow().tx.clone()
    }

    pub fn pending_rx(&self) -> usize {
        self.state.borrow().rx.len()
    }

    pub fn journal(&self) -> Vec<Access> {
        self.state.borrow().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.state.borrow_mut().journal.clear();
    }

    /// Plain registers plus the divisor latch, for whole-device comparisons.
    pub fn snapshot(&self) -> (BTreeMap<usize, u32>, (u32, u32)) {
        let state = self.state.borrow();
        (
            state.registers.clone(),
            (state.divisor_low, state.divisor_high),
        )
    }

    fn offset(&self, address: usize) -> Option<usize> {
        address
            .checked_sub(self.base)
            .filter(|offset| *offset < UART_REGISTER_SPAN)
    }
}

impl State {
    fn plain(&self, address: usize) -> u32 {
        self.registers.get(&address).copied().unwrap_or(0)
    }

    fn dlab(&self, base: usize) -> bool {
        self.plain(base + LCR) & LCR_DLAB != 0
    }

    fn status(&mut self) -> u32 {
        let mut usr = 0;
        if self.tx_full_reads > 0 {
            self.tx_full_reads -= 1;
        } else {
            usr |= USR_TFNF | USR_TFE;
        }
        if self.rx_empty_reads > 0 {
            self.rx_empty_reads -= 1;
        } else if !self.rx.is_empty() {
            usr |= USR_RFNE;
        }
        usr
    }
}

impl RegisterIo for SimulatedRegisters {
    fn read32(&self, address: usize) -> u32 {
        let mut state = self.state.borrow_mut();
        let dlab = state.dlab(self.base);
        let value = match self.offset(address) {
            Some(RBR) if dlab => state.divisor_low,
            Some(RBR) => state.rx.pop_front().map_or(0, u32::from),
            Some(IER) if dlab => state.divisor_high,
            Some(USR) => state.status(),
            _ => state.plain(address),
        };
        state.journal.push(Access::Read { address, value });
        value
    }

    fn write32(&self, address: usize, value: u32) {
        let mut state = self.state.borrow_mut();
        let dlab = state.dlab(self.base);
        match self.offset(address) {
            Some(DLL) if dlab => state.divisor_low = value,
            Some(THR) => state.tx.push(value as u8),
            Some(DLH) if dlab => state.divisor_high = value,
            Some(SRR) => {
                if value & SRR_RFR != 0 {
                    state.rx.clear();
                }
                state.registers.insert(address, value);
            }
            _ => {
                state.registers.insert(address, value);
            }
        }
        state.journal.push(Access::Write { address, value });
    }
}
