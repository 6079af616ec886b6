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

#![cfg_attr(not(test), no_std)]

pub mod console;
pub mod logger;
pub mod rk3399;

pub use rkfw_drivers as drivers;

use rkfw_drivers::serial::{config::LineConfiguration, SerialError};

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error("Console setup failed: {0}")]
    Console(#[from] SerialError),
    #[error("Another logger is already installed")]
    LoggerInUse,
}

/// Brings up the debug console, then routes `log` records to it.
pub fn board_init() -> Result<LineConfiguration, BoardError> {
    let config = rk3399::serial_port::console_init()?;
    logger::ensure_logger().map_err(|_| BoardError::LoggerInUse)?;
    log::info!(
        "{}: {} baud, {} data bits, parity {:?}, stop bits {:?}",
        rk3399::sys_config::CONSOLE_UART.name(),
        config.baud_rate,
        config.data_bits.bits(),
        config.parity,
        config.stop_bits
    );
    Ok(config)
}
