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

//! Board serial port: the debug UART with the board's default line settings.

use super::sys_config::{CONSOLE_PLATFORM, DEFAULT_ATTRIBUTES};
use core::fmt;
use rkfw_drivers::{
    mmio::{Mmio, RegisterIo},
    serial::{
        config::{LineConfiguration, SerialAttributes},
        dw_uart::{UartController, UartPlatformConfig},
        ControlSignals, SerialError,
    },
};
use spin::{Mutex, Once};

pub struct SerialPort<'a, R: RegisterIo + ?Sized> {
    uart: UartController<'a, R>,
    defaults: SerialAttributes,
    current: Option<LineConfiguration>,
}

impl<'a, R: RegisterIo + ?Sized> SerialPort<'a, R> {
    pub const fn new(io: &'a R, platform: UartPlatformConfig, defaults: SerialAttributes) -> Self {
        Self {
            uart: UartController::new(io, platform),
            defaults,
            current: None,
        }
    }

    /// Programs the board defaults.
    pub fn initialize(&mut self) -> Result<LineConfiguration, SerialError> {
        let defaults = self.defaults;
        self.program(&defaults)
    }

    /// Reprograms the line. A zero baud rate, FIFO depth or data-bit count
    /// asks for the board default; every other value is taken as is.
    pub fn set_attributes(
        &mut self,
        requested: &SerialAttributes,
    ) -> Result<LineConfiguration, SerialError> {
        let mut attributes = *requested;
        if attributes.baud_rate == 0 {
            attributes.baud_rate = self.defaults.baud_rate;
        }
        if attributes.receive_fifo_depth == 0 {
            attributes.receive_fifo_depth = self.defaults.receive_fifo_depth;
        }
        if attributes.data_bits == 0 {
            attributes.data_bits = self.defaults.data_bits;
        }
        self.program(&attributes)
    }

    /// The configuration last programmed successfully. `None` before the
    /// first initialization and after a rejected request, since the device
    /// is then left reset but unconfigured.
    pub fn attributes(&self) -> Option<&LineConfiguration> {
        self.current.as_ref()
    }

    pub fn write(&mut self, buffer: &[u8]) -> usize {
        self.uart.write(buffer)
    }

    pub fn read(&mut self, buffer: &mut [u8]) -> usize {
        self.uart.read(buffer)
    }

    pub fn poll(&self) -> bool {
        self.uart.poll()
    }

    pub fn set_control(&mut self, signals: ControlSignals) -> Result<(), SerialError> {
        self.uart.set_control_signals(signals)
    }

    pub fn control(&self) -> Result<ControlSignals, SerialError> {
        self.uart.control_signals()
    }

    fn program(&mut self, attributes: &SerialAttributes) -> Result<LineConfiguration, SerialError> {
        let result = self.uart.initialize(attributes);
        self.current = result.ok();
        result
    }
}

impl<R: RegisterIo + ?Sized> fmt::Write for SerialPort<'_, R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s.as_bytes());
        Ok(())
    }
}

// SAFETY: the firmware runs with a flat identity mapping and the console only
// ever touches addresses from the platform memory map, which are device memory.
static MMIO: Mmio = unsafe { Mmio::new() };

static CONSOLE: Once<Mutex<SerialPort<'static, Mmio>>> = Once::new();

/// Sets up the debug console. The port lives for the rest of the boot;
/// calling this again reprograms it with the defaults.
pub fn console_init() -> Result<LineConfiguration, SerialError> {
    CONSOLE
        .call_once(|| Mutex::new(SerialPort::new(&MMIO, CONSOLE_PLATFORM, DEFAULT_ATTRIBUTES)))
        .lock()
        .initialize()
}

/// The debug console, once [`console_init`] has run.
pub fn get_console() -> Option<&'static Mutex<SerialPort<'static, Mmio>>> {
    CONSOLE.get()
}
