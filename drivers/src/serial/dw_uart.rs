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

//! Synopsys DesignWare APB UART (16550 compatible) in polled mode, as found
//! on Rockchip RK3399.

use super::{
    config::{DataBits, LineConfiguration, Parity, SerialAttributes, StopBits},
    ControlSignals, SerialError, UartOps,
};
use crate::mmio::RegisterIo;
use core::hint::spin_loop;
use embedded_io::{ErrorType, Read, ReadReady, Write, WriteReady};
use tock_registers::{
    fields::{Field, FieldValue},
    register_bitfields, LocalRegisterCopy,
};

// Register offsets, 4-byte stride.
/// Receive Buffer Register
pub const RBR: usize = 0x00;
/// Transmit Holding Register
pub const THR: usize = 0x00;
/// Divisor Latch Low, while LCR.DLAB is set
pub const DLL: usize = 0x00;
/// Interrupt Enable Register
pub const IER: usize = 0x04;
/// Divisor Latch High, while LCR.DLAB is set
pub const DLH: usize = 0x04;
/// Line Control Register
pub const LCR: usize = 0x0c;
/// Modem Control Register
pub const MCR: usize = 0x10;
/// UART Status Register
pub const USR: usize = 0x7c;
/// Software Reset Register
pub const SRR: usize = 0x88;
/// Shadow FIFO Enable
pub const SFE: usize = 0x98;
/// Shadow Receive Trigger
pub const SRT: usize = 0x9c;
/// Shadow Transmit Empty Trigger
pub const STET: usize = 0xa0;

pub const UART_REGISTER_SPAN: usize = 0x100;

/// Oversampling factor of the baud-rate generator.
pub const UART_MODE_X_DIV: u32 = 16;

/// Largest value the DLL/DLH pair can hold.
pub const MAX_DIVISOR: u32 = 0xffff;

register_bitfields! [
    u32,

    /// Software Reset Register
    pub SRR [
        /// UART reset
        UR OFFSET(0) NUMBITS(1) [],
        /// Receive FIFO reset
        RFR OFFSET(1) NUMBITS(1) [],
        /// Transmit FIFO reset
        XFR OFFSET(2) NUMBITS(1) []
    ],

    /// Modem Control Register
    pub MCR [
        /// Data terminal ready
        DTR OFFSET(0) NUMBITS(1) [],
        /// Request to send
        RTS OFFSET(1) NUMBITS(1) [],
        /// Loopback
        LOOPBACK OFFSET(4) NUMBITS(1) [],
        /// Auto flow control enable
        AFCE OFFSET(5) NUMBITS(1) [],
        /// SIR (IrDA) mode enable
        SIRE OFFSET(6) NUMBITS(1) []
    ],

    /// Line Control Register
    pub LCR [
        /// Data length select
        DLS OFFSET(0) NUMBITS(2) [
            Bits5 = 0,
            Bits6 = 1,
            Bits7 = 2,
            Bits8 = 3
        ],
        /// Number of stop bits
        STOP OFFSET(2) NUMBITS(1) [
            One = 0,
            OneOrTwo = 1
        ],
        /// Parity enable
        PEN OFFSET(3) NUMBITS(1) [],
        /// Even parity select
        EPS OFFSET(4) NUMBITS(1) [],
        /// Divisor latch access
        DLAB OFFSET(7) NUMBITS(1) []
    ],

    /// UART Status Register
    pub USR [
        /// UART busy
        BUSY OFFSET(0) NUMBITS(1) [],
        /// Transmit FIFO not full
        TFNF OFFSET(1) NUMBITS(1) [],
        /// Transmit FIFO empty
        TFE OFFSET(2) NUMBITS(1) [],
        /// Receive FIFO not empty
        RFNE OFFSET(3) NUMBITS(1) [],
        /// Receive FIFO full
        RFF OFFSET(4) NUMBITS(1) []
    ],

    /// Shadow FIFO Enable
    pub SFE [
        SFE OFFSET(0) NUMBITS(1) []
    ],

    /// Shadow Receive Trigger
    pub SRT [
        RT OFFSET(0) NUMBITS(2) [
            OneCharacter = 0,
            QuarterFull = 1,
            HalfFull = 2,
            TwoLessThanFull = 3
        ]
    ],

    /// Shadow Transmit Empty Trigger
    pub STET [
        TET OFFSET(0) NUMBITS(2) [
            Empty = 0,
            TwoCharacters = 1,
            QuarterFull = 2,
            HalfFull = 3
        ]
    ]
];

/// A register/value pair that routes the UART signals to their pins.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PinMux {
    pub register: usize,
    pub value: u32,
}

/// Everything the controller needs to know about where the UART sits.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct UartPlatformConfig {
    /// Start of the UART register block.
    pub base: usize,
    /// Reference clock of the baud-rate generator.
    pub clock_hz: u32,
    pub pin_mux: PinMux,
}

/// Baud-rate divisor for `baud_rate`, truncated toward zero.
///
/// `baud_rate` must be non-zero. Rates above `clock_hz / 16` yield 0.
pub const fn baud_divisor(clock_hz: u32, baud_rate: u64) -> u32 {
    // Bounded by clock_hz, so the narrowing never loses bits.
    (clock_hz as u64 / UART_MODE_X_DIV as u64 / baud_rate) as u32
}

fn data_bits_field(data_bits: DataBits) -> FieldValue<u32, LCR::Register> {
    match data_bits {
        DataBits::Five => LCR::DLS::Bits5,
        DataBits::Six => LCR::DLS::Bits6,
        DataBits::Seven => LCR::DLS::Bits7,
        DataBits::Eight => LCR::DLS::Bits8,
    }
}

fn parity_bits(parity: Parity) -> u32 {
    match parity {
        Parity::None => 0,
        Parity::Even => (LCR::PEN::SET + LCR::EPS::SET).into(),
    }
}

fn stop_bits(stop_bits: StopBits) -> u32 {
    match stop_bits {
        StopBits::One => LCR::STOP::One.into(),
        StopBits::OneOrTwo => LCR::STOP::OneOrTwo.into(),
    }
}

/// Polled driver for one UART register block.
///
/// The controller owns no memory of its own; all state lives in the device
/// and every access goes through the [`RegisterIo`] it was built with.
/// Blocking operations spin on the status register without a timeout.
#[derive(Debug)]
pub struct UartController<'a, R: RegisterIo + ?Sized> {
    io: &'a R,
    platform: UartPlatformConfig,
}

impl<'a, R: RegisterIo + ?Sized> UartController<'a, R> {
    pub const fn new(io: &'a R, platform: UartPlatformConfig) -> Self {
        Self { io, platform }
    }

    pub fn platform(&self) -> &UartPlatformConfig {
        &self.platform
    }

    /// Brings the UART from an unknown state to `attributes`.
    ///
    /// The device is reset and left poll-only before the line settings are
    /// validated, so on `InvalidParameter` it stays reset but unconfigured.
    /// A baud rate too low for the 16-bit divisor latch is rejected the same
    /// way. Nothing is clamped: the returned configuration is the requested one.
    pub fn initialize(
        &mut self,
        attributes: &SerialAttributes,
    ) -> Result<LineConfiguration, SerialError> {
        let PinMux { register, value } = self.platform.pin_mux;
        self.io.write32(register, value);

        self.write_reg(SRR, (SRR::UR::SET + SRR::RFR::SET + SRR::XFR::SET).into());
        // Poll-only.
        self.write_reg(IER, 0);
        self.write_reg(MCR, MCR::SIRE::CLEAR.into());

        let mut lcr = self.line_control();
        let config = LineConfiguration::try_from(attributes)?;
        let divisor = baud_divisor(self.platform.clock_hz, config.baud_rate);
        // The latch is two bytes wide.
        if divisor > MAX_DIVISOR {
            return Err(SerialError::InvalidParameter);
        }
        lcr.modify(data_bits_field(config.data_bits));
        lcr.set(lcr.get() | parity_bits(config.parity) | stop_bits(config.stop_bits));
        self.write_reg(LCR, lcr.get());

        self.set_divisor_latch(true);
        self.write_reg(DLL, divisor & 0xff);
        self.write_reg(DLH, (divisor >> 8) & 0xff);
        self.set_divisor_latch(false);

        self.write_reg(SFE, SFE::SFE::SET.into());
        self.write_reg(SRT, SRT::RT::TwoLessThanFull.into());
        self.write_reg(STET, STET::TET::TwoCharacters.into());

        Ok(config)
    }

    /// Hands every byte of `buffer` to the transmit FIFO, in order.
    pub fn write(&mut self, buffer: &[u8]) -> usize {
        for &byte in buffer {
            self.wait_for(USR::TFNF);
            self.write_reg(THR, u32::from(byte));
        }
        buffer.len()
    }

    /// Fills `buffer` from the receive FIFO, waiting for each byte.
    pub fn read(&mut self, buffer: &mut [u8]) -> usize {
        for slot in buffer.iter_mut() {
            self.wait_for(USR::RFNE);
            *slot = self.read_reg(RBR) as u8;
        }
        buffer.len()
    }

    /// Whether a received byte is waiting. Never blocks.
    pub fn poll(&self) -> bool {
        self.status().is_set(USR::RFNE)
    }

    /// Modem control lines are not wired up; any request is accepted and
    /// has no effect.
    pub fn set_control_signals(&mut self, _signals: ControlSignals) -> Result<(), SerialError> {
        Ok(())
    }

    /// Always reports no signal asserted.
    pub fn control_signals(&self) -> Result<ControlSignals, SerialError> {
        Ok(ControlSignals::empty())
    }

    #[inline]
    fn read_reg(&self, offset: usize) -> u32 {
        self.io.read32(self.platform.base + offset)
    }

    #[inline]
    fn write_reg(&self, offset: usize, value: u32) {
        self.io.write32(self.platform.base + offset, value)
    }

    #[inline]
    fn status(&self) -> LocalRegisterCopy<u32, USR::Register> {
        LocalRegisterCopy::new(self.read_reg(USR))
    }

    #[inline]
    fn line_control(&self) -> LocalRegisterCopy<u32, LCR::Register> {
        LocalRegisterCopy::new(self.read_reg(LCR))
    }

    fn wait_for(&self, flag: Field<u32, USR::Register>) {
        while !self.status().is_set(flag) {
            spin_loop();
        }
    }

    fn set_divisor_latch(&self, enable: bool) {
        let mut lcr = self.line_control();
        if enable {
            lcr.modify(LCR::DLAB::SET);
        } else {
            lcr.modify(LCR::DLAB::CLEAR);
        }
        self.write_reg(LCR, lcr.get());
    }
}

impl<R: RegisterIo + ?Sized> ErrorType for UartController<'_, R> {
    type Error = SerialError;
}

impl<R: RegisterIo + ?Sized> Read for UartController<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        Ok(UartController::read(self, buf))
    }
}

impl<R: RegisterIo + ?Sized> ReadReady for UartController<'_, R> {
    fn read_ready(&mut self) -> Result<bool, SerialError> {
        Ok(self.poll())
    }
}

impl<R: RegisterIo + ?Sized> Write for UartController<'_, R> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, SerialError> {
        Ok(UartController::write(self, buf))
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        self.wait_for(USR::TFE);
        Ok(())
    }
}

impl<R: RegisterIo + ?Sized> WriteReady for UartController<'_, R> {
    fn write_ready(&mut self) -> Result<bool, SerialError> {
        Ok(self.status().is_set(USR::TFNF))
    }
}

impl<R: RegisterIo + ?Sized> UartOps for UartController<'_, R> {
    fn setup(&mut self, attributes: &SerialAttributes) -> Result<LineConfiguration, SerialError> {
        self.initialize(attributes)
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8, SerialError> {
        self.wait_for(USR::RFNE);
        Ok(self.read_reg(RBR) as u8)
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        self.wait_for(USR::TFNF);
        self.write_reg(THR, u32::from(byte));
        Ok(())
    }

    fn set_control(&mut self, signals: ControlSignals) -> Result<(), SerialError> {
        self.set_control_signals(signals)
    }

    fn control(&self) -> Result<ControlSignals, SerialError> {
        self.control_signals()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::simulator::{Access, SimulatedRegisters};
    use crate::serial::config::_115200_8_N_1;

    const UART2_BASE: usize = 0xff1a_0000;
    const GRF_GPIO4C_IOMUX: usize = 0xff77_e028;
    const IOMUX_UART2C: u32 = (0xf << 22) | (0x5 << 6);
    const CLOCK_HZ: u32 = 24_000_000;

    fn platform() -> UartPlatformConfig {
        UartPlatformConfig {
            base: UART2_BASE,
            clock_hz: CLOCK_HZ,
            pin_mux: PinMux {
                register: GRF_GPIO4C_IOMUX,
                value: IOMUX_UART2C,
            },
        }
    }

    fn attributes(baud_rate: u64, data_bits: u8, parity: u8, stop_bits: u8) -> SerialAttributes {
        SerialAttributes {
            baud_rate,
            receive_fifo_depth: 0,
            data_bits,
            parity,
            stop_bits,
        }
    }

    fn write(offset: usize, value: u32) -> Access {
        Access::Write {
            address: UART2_BASE + offset,
            value,
        }
    }

    fn read(offset: usize, value: u32) -> Access {
        Access::Read {
            address: UART2_BASE + offset,
            value,
        }
    }

    fn writes_to(journal: &[Access], offset: usize) -> usize {
        journal
            .iter()
            .filter(|a| matches!(a, Access::Write { address, .. } if *address == UART2_BASE + offset))
            .count()
    }

    #[test]
    fn divisor_truncates() {
        assert_eq!(baud_divisor(CLOCK_HZ, 115_200), 13);
        assert_eq!(baud_divisor(CLOCK_HZ, 1_500_000), 1);
        assert_eq!(baud_divisor(CLOCK_HZ, 9600), 156);
        assert_eq!(baud_divisor(CLOCK_HZ, 1_500_001), 0);
        assert_eq!(baud_divisor(CLOCK_HZ, u64::MAX), 0);
        for baud in [300u64, 1200, 2400, 4800, 19_200, 57_600, 230_400, 921_600] {
            assert_eq!(
                u64::from(baud_divisor(CLOCK_HZ, baud)),
                u64::from(CLOCK_HZ) / 16 / baud
            );
        }
    }

    #[test]
    fn initialize_programs_registers_in_order() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());

        let config = uart.initialize(&attributes(115_200, 8, 0, 0)).unwrap();
        assert_eq!(config, _115200_8_N_1);

        let expected = [
            Access::Write {
                address: GRF_GPIO4C_IOMUX,
                value: IOMUX_UART2C,
            },
            write(SRR, 0b111),
            write(IER, 0),
            write(MCR, 0),
            read(LCR, 0),
            write(LCR, 0x03),
            read(LCR, 0x03),
            write(LCR, 0x83),
            write(DLL, 13),
            write(DLH, 0),
            read(LCR, 0x83),
            write(LCR, 0x03),
            write(SFE, 1),
            write(SRT, 3),
            write(STET, 1),
        ];
        assert_eq!(regs.journal(), expected);
        assert_eq!(regs.divisor_latch(), (13, 0));
    }

    #[test]
    fn divisor_is_split_into_latch_bytes() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());

        uart.initialize(&attributes(300, 8, 0, 0)).unwrap();
        // 24 MHz / 16 / 300 = 5000 = 0x1388
        assert_eq!(regs.divisor_latch(), (0x88, 0x13));
    }

    #[test]
    fn excessive_baud_rate_programs_zero_divisor() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        regs.preset(UART2_BASE + LCR, 0);
        let mut uart = UartController::new(&regs, platform());

        let config = uart.initialize(&attributes(3_000_000, 8, 0, 0)).unwrap();
        assert_eq!(config.baud_rate, 3_000_000);
        assert_eq!(regs.divisor_latch(), (0, 0));
        assert_eq!(writes_to(&regs.journal(), DLL), 1);
    }

    #[test]
    fn divisor_wider_than_latch_is_rejected() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());
        assert_eq!(uart.platform().base, regs.base());

        // 24 MHz / 16 / 22 = 68181, which needs 17 bits.
        assert!(baud_divisor(CLOCK_HZ, 22) > MAX_DIVISOR);
        assert_eq!(
            uart.initialize(&attributes(22, 8, 0, 0)),
            Err(SerialError::InvalidParameter)
        );
        let journal = regs.journal();
        assert_eq!(writes_to(&journal, LCR), 0);
        assert_eq!(writes_to(&journal, SFE), 0);
        assert_eq!(regs.divisor_latch(), (0, 0));

        // 23 baud is the slowest rate that still fits: 65217 = 0xfec1.
        regs.clear_journal();
        let config = uart.initialize(&attributes(23, 8, 0, 0)).unwrap();
        assert_eq!(config.baud_rate, 23);
        assert_eq!(regs.divisor_latch(), (0xc1, 0xfe));
    }

    #[test]
    fn line_control_keeps_unrelated_fields() {
        // Break control (bit 6) and a stale 8-bit data length.
        let preset = (1 << 6) | 0x03;
        let mut seen = Vec::new();
        for (bits, dls) in [(5u8, 0u32), (6, 1), (7, 2), (8, 3)] {
            let regs = SimulatedRegisters::new(UART2_BASE);
            regs.preset(UART2_BASE + LCR, preset);
            let mut uart = UartController::new(&regs, platform());

            uart.initialize(&attributes(115_200, bits, 0, 0)).unwrap();
            let lcr = regs.peek(UART2_BASE + LCR);
            assert_eq!(lcr, (1 << 6) | dls);
            seen.push(lcr);
        }
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn parity_and_stop_bits_are_or_ed_in() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());

        let config = uart.initialize(&attributes(115_200, 7, 1, 1)).unwrap();
        assert_eq!(config.data_bits, DataBits::Seven);
        assert_eq!(config.parity, Parity::Even);
        assert_eq!(config.stop_bits, StopBits::OneOrTwo);
        // EPS | PEN | STOP | DLS=7 bits
        assert_eq!(regs.peek(UART2_BASE + LCR), 0x10 | 0x08 | 0x04 | 0x02);
    }

    #[test]
    fn unsupported_data_bits_stop_after_reset() {
        for bits in [0u8, 4, 9] {
            let regs = SimulatedRegisters::new(UART2_BASE);
            let mut uart = UartController::new(&regs, platform());

            assert_eq!(
                uart.initialize(&attributes(115_200, bits, 0, 0)),
                Err(SerialError::InvalidParameter)
            );
            let journal = regs.journal();
            assert_eq!(journal.len(), 5);
            assert_eq!(writes_to(&journal, SRR), 1);
            assert_eq!(writes_to(&journal, LCR), 0);
            assert_eq!(writes_to(&journal, SFE), 0);
            assert_eq!(writes_to(&journal, SRT), 0);
            assert_eq!(writes_to(&journal, STET), 0);
            assert_eq!(regs.divisor_latch(), (0, 0));
        }
    }

    #[test]
    fn unsupported_parity_or_stop_bits_are_rejected() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());

        assert_eq!(
            uart.initialize(&attributes(115_200, 8, 2, 0)),
            Err(SerialError::InvalidParameter)
        );
        assert_eq!(
            uart.initialize(&attributes(115_200, 8, 0, 2)),
            Err(SerialError::InvalidParameter)
        );
        assert_eq!(writes_to(&regs.journal(), STET), 0);

        // A corrected request succeeds on the same controller.
        assert!(uart.initialize(&attributes(115_200, 8, 0, 0)).is_ok());
    }

    #[test]
    fn initialize_is_idempotent() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        regs.preset(UART2_BASE + LCR, 1 << 6);
        let mut uart = UartController::new(&regs, platform());
        let request = attributes(57_600, 6, 1, 0);

        let first = uart.initialize(&request).unwrap();
        let after_first = regs.snapshot();
        let second = uart.initialize(&request).unwrap();

        assert_eq!(first, second);
        assert_eq!(regs.snapshot(), after_first);
    }

    #[test]
    fn empty_write_touches_nothing() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());

        assert_eq!(uart.write(&[]), 0);
        assert!(regs.journal().is_empty());
    }

    #[test]
    fn empty_read_touches_nothing() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());

        assert_eq!(uart.read(&mut []), 0);
        assert!(regs.journal().is_empty());
    }

    #[test]
    fn write_waits_for_room_before_every_byte() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());
        regs.hold_tx_full(3);

        assert_eq!(uart.write(b"boot"), 4);
        assert_eq!(regs.transmitted(), b"boot");

        let journal = regs.journal();
        let status_reads = journal
            .iter()
            .filter(|a| matches!(a, Access::Read { address, .. } if *address == UART2_BASE + USR))
            .count();
        // Three spins on the first byte, then one check per byte.
        assert_eq!(status_reads, 3 + 4);
        assert_eq!(writes_to(&journal, THR), 4);
        for (i, access) in journal.iter().enumerate() {
            if let Access::Write { address, .. } = access {
                assert_eq!(*address, UART2_BASE + THR);
                assert_eq!(journal[i - 1].address(), UART2_BASE + USR);
            }
        }
    }

    #[test]
    fn read_returns_bytes_in_arrival_order() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());
        regs.receive(&[0x55, 0xaa, 0x0d]);
        regs.hold_rx_empty(2);

        let mut buf = [0u8; 3];
        assert_eq!(uart.read(&mut buf), 3);
        assert_eq!(buf, [0x55, 0xaa, 0x0d]);

        let journal = regs.journal();
        let data_reads: Vec<usize> = journal
            .iter()
            .enumerate()
            .filter(|(_, a)| a.address() == UART2_BASE + RBR)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(data_reads.len(), 3);
        for i in data_reads {
            assert_eq!(journal[i - 1].address(), UART2_BASE + USR);
        }
        assert_eq!(regs.pending_rx(), 0);
    }

    #[test]
    fn poll_reflects_receive_fifo() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let uart = UartController::new(&regs, platform());

        assert!(!uart.poll());
        regs.receive(b"x");
        let before = regs.snapshot();
        assert!(uart.poll());
        assert!(uart.poll());
        assert_eq!(regs.snapshot(), before);
        assert_eq!(regs.pending_rx(), 1);
        assert!(regs
            .journal()
            .iter()
            .all(|a| matches!(a, Access::Read { .. })));
    }

    #[test]
    fn control_signals_are_inert() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());

        assert_eq!(uart.set_control_signals(ControlSignals::all()), Ok(()));
        assert_eq!(
            uart.set_control(ControlSignals::REQUEST_TO_SEND | ControlSignals::DATA_TERMINAL_READY),
            Ok(())
        );
        assert_eq!(uart.control_signals(), Ok(ControlSignals::empty()));
        assert_eq!(uart.control(), Ok(ControlSignals::empty()));
        assert!(regs.journal().is_empty());
    }

    #[test]
    fn flush_spins_until_transmit_fifo_drains() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());

        regs.hold_tx_full(1);
        assert!(!uart.write_ready().unwrap());
        assert!(uart.write_ready().unwrap());

        regs.hold_tx_full(4);
        regs.clear_journal();
        Write::flush(&mut uart).unwrap();
        let journal = regs.journal();
        assert_eq!(journal.len(), 4 + 1);
        assert!(journal
            .iter()
            .all(|a| matches!(a, Access::Read { address, .. } if *address == UART2_BASE + USR)));
        assert!(regs.transmitted().is_empty());
    }

    #[test]
    fn embedded_io_traits_drive_the_same_paths() {
        let regs = SimulatedRegisters::new(UART2_BASE);
        let mut uart = UartController::new(&regs, platform());

        uart.write_all(b"ok\r\n").unwrap();
        Write::flush(&mut uart).unwrap();
        assert_eq!(regs.transmitted(), b"ok\r\n");
        assert!(uart.write_ready().unwrap());

        assert!(!uart.read_ready().unwrap());
        regs.receive(b"y");
        assert!(uart.read_ready().unwrap());
        assert_eq!(uart.read_byte(), Ok(b'y'));
        uart.write_byte(b'!').unwrap();
        assert_eq!(regs.transmitted(), b"ok\r\n!");
    }
}
