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

use bitflags::bitflags;
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write, WriteReady};

pub mod config;
pub mod dw_uart;

use config::{LineConfiguration, SerialAttributes};

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum SerialError {
    #[error("Invalid configuration")]
    InvalidParameter,
    #[error("Operation not supported")]
    Unsupported,
}

impl embedded_io::Error for SerialError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::from(*self)
    }
}

impl From<SerialError> for ErrorKind {
    fn from(error: SerialError) -> Self {
        match error {
            SerialError::InvalidParameter => ErrorKind::InvalidInput,
            SerialError::Unsupported => ErrorKind::Unsupported,
        }
    }
}

bitflags! {
    /// Modem and loopback control lines of a serial device.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct ControlSignals: u32 {
        const DATA_TERMINAL_READY = 0x0001;
        const REQUEST_TO_SEND = 0x0002;
        const HARDWARE_LOOPBACK = 0x1000;
        const SOFTWARE_LOOPBACK = 0x2000;
        const HARDWARE_FLOW_CONTROL = 0x4000;
    }
}

/// Capabilities every serial backend of the firmware offers.
pub trait UartOps:
    Read + Write + ReadReady + WriteReady + ErrorType<Error = SerialError>
{
    fn setup(&mut self, attributes: &SerialAttributes) -> Result<LineConfiguration, SerialError>;
    fn read_byte(&mut self) -> Result<u8, SerialError>;
    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError>;
    fn set_control(&mut self, signals: ControlSignals) -> Result<(), SerialError>;
    fn control(&self) -> Result<ControlSignals, SerialError>;
}
