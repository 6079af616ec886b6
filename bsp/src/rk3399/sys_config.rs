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

use super::UartInstance;
use rkfw_drivers::serial::{
    config::SerialAttributes,
    dw_uart::{PinMux, UartPlatformConfig},
};

/* ================================================================================ */
/* ================              Peripheral memory map             ================ */
/* ================================================================================ */

pub const UART0_BASE: usize = 0xFF18_0000;
pub const UART1_BASE: usize = 0xFF19_0000;
pub const UART2_BASE: usize = 0xFF1A_0000;
pub const UART3_BASE: usize = 0xFF1B_0000;
pub const UART4_BASE: usize = 0xFF37_0000;

pub const GRF_BASE: usize = 0xFF77_0000;

/* GRF pin multiplexing */
pub const GRF_GPIO4C_IOMUX: usize = 0xE028;
/// Selects uart2c rx/tx on GPIO4_C3/GPIO4_C4. The upper half is the
/// write-enable mask for those two mux fields.
pub const GRF_GPIO4C_IOMUX_UART2C: u32 = (0xf << (6 + 16)) | (0x5 << 6);

pub const UART_CLOCK: u32 = 24_000_000;

/* ================================================================================ */
/* ================                 Debug console                  ================ */
/* ================================================================================ */

pub const CONSOLE_UART: UartInstance = UartInstance::Uart2;

pub const CONSOLE_PLATFORM: UartPlatformConfig = UartPlatformConfig {
    base: CONSOLE_UART.base(),
    clock_hz: UART_CLOCK,
    pin_mux: PinMux {
        register: GRF_BASE + GRF_GPIO4C_IOMUX,
        value: GRF_GPIO4C_IOMUX_UART2C,
    },
};

pub const DEFAULT_BAUD_RATE: u64 = 1_500_000;
pub const DEFAULT_RECEIVE_FIFO_DEPTH: u32 = 0;
pub const DEFAULT_DATA_BITS: u8 = 8;
/// No parity.
pub const DEFAULT_PARITY: u8 = 0;
/// One stop bit.
pub const DEFAULT_STOP_BITS: u8 = 0;

pub const DEFAULT_ATTRIBUTES: SerialAttributes = SerialAttributes {
    baud_rate: DEFAULT_BAUD_RATE,
    receive_fifo_depth: DEFAULT_RECEIVE_FIFO_DEPTH,
    data_bits: DEFAULT_DATA_BITS,
    parity: DEFAULT_PARITY,
    stop_bits: DEFAULT_STOP_BITS,
};
