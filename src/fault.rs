//! Decoding of the Cortex-M fault status registers
//!
//! The scheduler never recovers from a fault. These types exist so the fault
//! handlers in an application can say what went wrong, and which task was
//! running when it did, before halting.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use bitflags::bitflags;

use crate::TaskId;

bitflags! {
    /// HardFault Status Register (HFSR)
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct HardFaultStatus: u32 {
        /// Bus fault on a vector table read
        const VECTTBL = 1 << 1;
        /// A configurable fault was escalated to HardFault
        const FORCED = 1 << 30;
        /// A debug event happened with the debugger disabled
        const DEBUGEVT = 1 << 31;
    }
}

bitflags! {
    /// MemManage Fault Status Register (MMFSR, the low byte of CFSR)
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct MemManageStatus: u8 {
        /// Instruction fetch from a location that does not permit execution
        const IACCVIOL = 1 << 0;
        /// Data access to a location that does not permit it
        const DACCVIOL = 1 << 1;
        /// Unstacking on exception return faulted
        const MUNSTKERR = 1 << 3;
        /// Stacking on exception entry faulted
        const MSTKERR = 1 << 4;
        /// Lazy FPU state preservation faulted
        const MLSPERR = 1 << 5;
        /// MMFAR holds the faulting address
        const MMARVALID = 1 << 7;
    }
}

bitflags! {
    /// BusFault Status Register (BFSR, the second byte of CFSR)
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct BusFaultStatus: u8 {
        /// Bus error on an instruction prefetch
        const IBUSERR = 1 << 0;
        /// Precise data bus error
        const PRECISERR = 1 << 1;
        /// Imprecise data bus error
        const IMPRECISERR = 1 << 2;
        /// Unstacking on exception return faulted
        const UNSTKERR = 1 << 3;
        /// Stacking on exception entry faulted
        const STKERR = 1 << 4;
        /// Lazy FPU state preservation faulted
        const LSPERR = 1 << 5;
        /// BFAR holds the faulting address
        const BFARVALID = 1 << 7;
    }
}

bitflags! {
    /// UsageFault Status Register (UFSR, the top half of CFSR)
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct UsageFaultStatus: u16 {
        /// Undefined instruction
        const UNDEFINSTR = 1 << 0;
        /// Tried to leave Thumb state, or similar illegal EPSR use
        const INVSTATE = 1 << 1;
        /// Bad EXC_RETURN value
        const INVPC = 1 << 2;
        /// Coprocessor access with the coprocessor disabled
        const NOCP = 1 << 3;
        /// Stack limit check failed (Armv8-M Mainline only)
        const STKOF = 1 << 4;
        /// Unaligned access with alignment trapping enabled
        const UNALIGNED = 1 << 8;
        /// Integer divide by zero with trapping enabled
        const DIVBYZERO = 1 << 9;
    }
}

/// Implement `defmt::Format` for a `bitflags` type, as the raw value
/// followed by the name of every bit that is set
macro_rules! format_flags {
    ($ty:ty, $hint:tt) => {
        impl defmt::Format for $ty {
            fn format(&self, fmt: defmt::Formatter) {
                defmt::write!(fmt, $hint, self.bits());
                for (name, _) in self.iter_names() {
                    defmt::write!(fmt, " {=str}", name);
                }
            }
        }
    };
}

format_flags!(HardFaultStatus, "{=u32:08x}");
format_flags!(MemManageStatus, "{=u8:02x}");
format_flags!(BusFaultStatus, "{=u8:02x}");
format_flags!(UsageFaultStatus, "{=u16:04x}");

/// Everything the fault status registers can tell us about a fault
#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
pub struct FaultReport {
    /// The task that was running when the fault happened
    pub task: TaskId,
    /// Why we got a HardFault
    pub hard_fault: HardFaultStatus,
    /// Memory protection violations
    pub mem_manage: MemManageStatus,
    /// Bus errors
    pub bus_fault: BusFaultStatus,
    /// Instruction execution faults
    pub usage_fault: UsageFaultStatus,
    /// The address that caused a MemManage fault, if known
    pub mem_manage_address: Option<u32>,
    /// The address that caused a BusFault, if known
    pub bus_fault_address: Option<u32>,
}

impl FaultReport {
    /// Decode raw register values
    ///
    /// `cfsr` is the whole Configurable Fault Status Register; the fault
    /// address registers are only reported when CFSR says they are valid.
    pub fn decode(task: TaskId, hfsr: u32, cfsr: u32, mmfar: u32, bfar: u32) -> FaultReport {
        let mem_manage = MemManageStatus::from_bits_truncate(cfsr as u8);
        let bus_fault = BusFaultStatus::from_bits_truncate((cfsr >> 8) as u8);
        let usage_fault = UsageFaultStatus::from_bits_truncate((cfsr >> 16) as u16);
        FaultReport {
            task,
            hard_fault: HardFaultStatus::from_bits_truncate(hfsr),
            mem_manage,
            bus_fault,
            usage_fault,
            mem_manage_address: mem_manage
                .contains(MemManageStatus::MMARVALID)
                .then_some(mmfar),
            bus_fault_address: bus_fault.contains(BusFaultStatus::BFARVALID).then_some(bfar),
        }
    }

    /// Read and decode the fault status registers
    #[cfg(all(
        target_arch = "arm",
        not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base"))
    ))]
    pub fn capture() -> FaultReport {
        // SAFETY: these are read-only accesses to always-present system
        // registers
        let scb = unsafe { &*cortex_m::peripheral::SCB::PTR };
        FaultReport::decode(
            crate::task_id(),
            scb.hfsr.read(),
            scb.cfsr.read(),
            scb.mmfar.read(),
            scb.bfar.read(),
        )
    }

    /// Was this a configurable fault that got escalated to HardFault?
    pub fn is_escalated(&self) -> bool {
        self.hard_fault.contains(HardFaultStatus::FORCED)
    }
}

/// Log what the fault status registers say, then stop
///
/// Call this from your fault handlers. `kind` names the exception that
/// fired.
#[cfg(all(
    target_arch = "arm",
    not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base"))
))]
pub fn report_and_halt(kind: &str) -> ! {
    let report = FaultReport::capture();
    error!("{=str} in {}: {}", kind, report.task, report);
    cortex_m::asm::udf();
}

/// Turn on the MemManage, BusFault and UsageFault exceptions
///
/// Otherwise every fault is escalated to HardFault, and we lose the detail
/// of what kind of fault it was.
#[cfg(all(
    target_arch = "arm",
    not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base"))
))]
pub fn enable_fault_exceptions(scb: &mut cortex_m::peripheral::SCB) {
    use cortex_m::peripheral::scb::Exception;

    scb.enable(Exception::MemoryManagement);
    scb.enable(Exception::BusFault);
    scb.enable(Exception::UsageFault);
}


// End of File
