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

//! Useful UART types

use super::SerialError;

/// Data bits
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DataBits {
    /// 5 bits
    Five,
    /// 6 bits
    Six,
    /// 7 bits
    Seven,
    /// 8 bits
    Eight,
}

/// Stop bits
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StopBits {
    /// 1 bit
    One,
    /// 1.5 bits for 5-bit characters, 2 bits otherwise
    OneOrTwo,
}

/// Parity
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Parity {
    /// No parity bit
    None,
    /// Even parity
    Even,
}

impl DataBits {
    pub const fn bits(self) -> u8 {
        match self {
            DataBits::Five => 5,
            DataBits::Six => 6,
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

impl TryFrom<u8> for DataBits {
    type Error = SerialError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            5 => Ok(DataBits::Five),
            6 => Ok(DataBits::Six),
            7 => Ok(DataBits::Seven),
            8 => Ok(DataBits::Eight),
            _ => Err(SerialError::InvalidParameter),
        }
    }
}

impl Parity {
    pub const fn code(self) -> u8 {
        match self {
            Parity::None => 0,
            Parity::Even => 1,
        }
    }
}

impl TryFrom<u8> for Parity {
    type Error = SerialError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Parity::None),
            1 => Ok(Parity::Even),
            _ => Err(SerialError::InvalidParameter),
        }
    }
}

impl StopBits {
    pub const fn code(self) -> u8 {
        match self {
            StopBits::One => 0,
            StopBits::OneOrTwo => 1,
        }
    }
}

impl TryFrom<u8> for StopBits {
    type Error = SerialError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StopBits::One),
            1 => Ok(StopBits::OneOrTwo),
            _ => Err(SerialError::InvalidParameter),
        }
    }
}

/// A fully specified line configuration, as programmed into the device.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LineConfiguration {
    /// The baudrate the uart will run at. Never zero.
    pub baud_rate: u64,

    /// Requested receive buffering. The hardware FIFO depth is fixed, so this
    /// is carried along but not acted upon.
    pub receive_fifo_depth: u32,

    /// The amount of data bits the uart should be configured to.
    pub data_bits: DataBits,

    /// The parity that this uart should have
    pub parity: Parity,

    /// The amount of stop bits the uart should be configured to.
    pub stop_bits: StopBits,
}

impl LineConfiguration {
    pub const fn new(
        baud_rate: u64,
        data_bits: DataBits,
        parity: Parity,
        stop_bits: StopBits,
    ) -> LineConfiguration {
        LineConfiguration {
            baud_rate,
            receive_fifo_depth: 0,
            data_bits,
            parity,
            stop_bits,
        }
    }
}

impl Default for LineConfiguration {
    fn default() -> Self {
        _1500000_8_N_1
    }
}

/// Line settings as proposed by a caller or a configuration store, before
/// validation. Codes follow the firmware serial-I/O conventions: parity 0 is
/// none and 1 is even, stop bits 0 is one and 1 is one-and-a-half-or-two.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SerialAttributes {
    pub baud_rate: u64,
    pub receive_fifo_depth: u32,
    pub data_bits: u8,
    pub parity: u8,
    pub stop_bits: u8,
}

impl TryFrom<&SerialAttributes> for LineConfiguration {
    type Error = SerialError;

    fn try_from(attributes: &SerialAttributes) -> Result<Self, Self::Error> {
        if attributes.baud_rate == 0 {
            return Err(SerialError::InvalidParameter);
        }
        Ok(LineConfiguration {
            baud_rate: attributes.baud_rate,
            receive_fifo_depth: attributes.receive_fifo_depth,
            data_bits: DataBits::try_from(attributes.data_bits)?,
            parity: Parity::try_from(attributes.parity)?,
            stop_bits: StopBits::try_from(attributes.stop_bits)?,
        })
    }
}

impl From<LineConfiguration> for SerialAttributes {
    fn from(config: LineConfiguration) -> Self {
        SerialAttributes {
            baud_rate: config.baud_rate,
            receive_fifo_depth: config.receive_fifo_depth,
            data_bits: config.data_bits.bits(),
            parity: config.parity.code(),
            stop_bits: config.stop_bits.code(),
        }
    }
}

/// 9600 baud, 8 data bits, no parity, 1 stop bit
pub const _9600_8_N_1: LineConfiguration =
    LineConfiguration::new(9600, DataBits::Eight, Parity::None, StopBits::One);

/// 38400 baud, 8 data bits, no parity, 1 stop bit
pub const _38400_8_N_1: LineConfiguration =
    LineConfiguration::new(38400, DataBits::Eight, Parity::None, StopBits::One);

/// 115200 baud, 8 data bits, no parity, 1 stop bit
pub const _115200_8_N_1: LineConfiguration =
    LineConfiguration::new(115200, DataBits::Eight, Parity::None, StopBits::One);

/// 1500000 baud, 8 data bits, no parity, 1 stop bit. Rockchip's debug console rate.
pub const _1500000_8_N_1: LineConfiguration =
    LineConfiguration::new(1_500_000, DataBits::Eight, Parity::None, StopBits::One);
