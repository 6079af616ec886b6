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

pub mod serial_port;
pub mod sys_config;

/// The UART controllers of the SoC.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UartInstance {
    Uart0,
    Uart1,
    Uart2,
    Uart3,
    /// Lives in the PMU power domain.
    Uart4,
}

impl UartInstance {
    pub const fn base(self) -> usize {
        match self {
            UartInstance::Uart0 => sys_config::UART0_BASE,
            UartInstance::Uart1 => sys_config::UART1_BASE,
            UartInstance::Uart2 => sys_config::UART2_BASE,
            UartInstance::Uart3 => sys_config::UART3_BASE,
            UartInstance::Uart4 => sys_config::UART4_BASE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            UartInstance::Uart0 => "uart0",
            UartInstance::Uart1 => "uart1",
            UartInstance::Uart2 => "uart2",
            UartInstance::Uart3 => "uart3",
            UartInstance::Uart4 => "uart4",
        }
    }
}
