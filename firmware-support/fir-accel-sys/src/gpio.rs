// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use ufmt::derive::uDebug;

/// Number of multiplexed I/O pads on the harness.
pub const PIN_COUNT: usize = 38;

/// Pad mode words understood by the pin multiplexer.
#[derive(uDebug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum PinMode {
    /// Output driven by the user project.
    UserOutput = 0x1808,
    /// Output driven by the management core.
    ManagementOutput = 0x1809,
}

/// Wrapper around the pin configuration block. The block exposes the
/// transfer register at offset `0x00` and one mode register per pad,
/// 4 bytes apart, starting at offset `0x24`.
///
/// Mode writes are staged; nothing reaches the pads until
/// [`Gpio::apply`] hands the staged configuration to the multiplexer.
pub struct Gpio {
    xfer: *mut u32,
    modes: *mut u32,
}

impl Gpio {
    // Word offset of the per-pad mode array.
    const MODES: usize = 0x09;

    /// Create a new [`Gpio`] instance given the base address of the pin
    /// configuration block.
    ///
    /// # Safety
    ///
    /// The `base_addr` pointer MUST be a valid pointer that is backed
    /// by the memory mapped pin configuration block.
    pub unsafe fn new(base_addr: *const ()) -> Gpio {
        let addr = base_addr as *mut u32;
        Gpio {
            xfer: addr,
            modes: addr.add(Self::MODES),
        }
    }

    /// Stage the mode of one pad.
    ///
    /// # Panics
    ///
    /// `pin` must be below [`PIN_COUNT`].
    pub fn set_mode(&mut self, pin: usize, mode: PinMode) {
        assert!(pin < PIN_COUNT);
        unsafe {
            self.modes.add(pin).write_volatile(mode as u32);
        }
    }

    /// Hand the staged pad modes to the pin multiplexer and wait until
    /// it acknowledges the transfer.
    pub fn apply(&mut self) {
        unsafe {
            self.xfer.write_volatile(1);
            while self.xfer.read_volatile() == 1 {}
        }
    }
}
