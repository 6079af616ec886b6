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

use crate::rk3399::serial_port::get_console;
use core::fmt::{self, Write};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

struct Logger;

pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

///set max log level
pub fn set_max_level(level: LogLevel) {
    match level {
        LogLevel::Trace => log::set_max_level(LevelFilter::Trace),
        LogLevel::Debug => log::set_max_level(LevelFilter::Debug),
        LogLevel::Info => log::set_max_level(LevelFilter::Info),
        LogLevel::Warn => log::set_max_level(LevelFilter::Warn),
        LogLevel::Error => log::set_max_level(LevelFilter::Error),
    }
}

static LOGGER: Logger = Logger {};

/// log init
///
/// Fails if any logger, this one included, is already installed; the max
/// level is left alone in that case.
pub fn logger_init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    #[cfg(debug_assertions)]
    log::set_max_level(LevelFilter::Trace);
    #[cfg(not(debug_assertions))]
    log::set_max_level(LevelFilter::Warn);
    Ok(())
}

/// Whether `log` records currently reach the debug console.
pub fn is_installed() -> bool {
    core::ptr::addr_eq(log::logger() as *const dyn log::Log, &LOGGER as *const Logger)
}

/// Installs the console logger unless it already is. Re-entry keeps the
/// current max level; a foreign logger is reported as an error.
pub fn ensure_logger() -> Result<(), SetLoggerError> {
    if is_installed() {
        return Ok(());
    }
    logger_init()
}

fn format_record(out: &mut impl Write, record: &Record) -> fmt::Result {
    write!(
        out,
        "[{}] {}: {}\r\n",
        record.level(),
        record.target(),
        record.args()
    )
}

///impl log for Logger
impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // One lock per record keeps lines whole.
        if let Some(console) = get_console() {
            let _ = format_record(&mut *console.lock(), record);
        }
    }

    fn flush(&self) {}
}
