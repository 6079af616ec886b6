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

//! Device drivers for the RK3399 boot firmware.
//!
//! Only the serial path lives here for now: a register access capability
//! ([`mmio`]) and the DesignWare APB UART controller built on it
//! ([`serial`]).

#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "simulator"))]
extern crate alloc;

pub mod mmio;
pub mod serial;
