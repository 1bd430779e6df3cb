// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
#![no_std]
#![cfg_attr(not(test), no_main)]

#[cfg(not(test))]
use core::panic::PanicInfo;

#[cfg(not(test))]
use riscv_rt::entry;

use fir_accel_sys::fir_filter::{stream, FirFilter, TAP_COUNT};
use fir_accel_sys::gpio::{Gpio, PinMode};
use fir_accel_sys::test_signal::TestSignal;

const PIN_CONFIG_ADDR: *const () = 0x2600_0000 as *const ();
const SIGNAL_ADDR: *const () = 0x2600_000C as *const ();
const FILTER_ADDR: *const () = 0x3000_0000 as *const ();

const TAPS: [i32; TAP_COUNT] = [0, -10, -9, 23, 56, 63, 56, 23, -9, -10, 0];
const INPUTS: [i32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
const EXPECTED: [i32; 10] = [0, -10, -29, -25, 35, 158, 337, 539, 732, 915];

/// Status polls granted to the streaming loop before giving up.
const POLL_BUDGET: usize = 10_000;

#[cfg_attr(not(test), entry)]
fn main() -> ! {
    // The upper pads go to the management core so the bench can observe
    // the verdict; the lower pads belong to the user project. Pad 6
    // carries the management UART Tx line.
    let mut gpio = unsafe { Gpio::new(PIN_CONFIG_ADDR) };
    for pin in 0..16 {
        gpio.set_mode(pin, PinMode::UserOutput);
    }
    gpio.set_mode(6, PinMode::ManagementOutput);
    for pin in 16..32 {
        gpio.set_mode(pin, PinMode::ManagementOutput);
    }
    gpio.apply();

    let mut signal = unsafe { TestSignal::new(SIGNAL_ADDR) };
    signal.flag_start();

    let mut filter = unsafe { FirFilter::new(FILTER_ADDR) };
    let mut outputs = [0i32; INPUTS.len()];
    let outcome = stream(&mut filter, &TAPS, &INPUTS, &mut outputs, POLL_BUDGET);

    if outcome.passed && outputs == EXPECTED {
        signal.flag_pass();
    }

    loop {
        continue;
    }
}

#[cfg(not(test))]
#[panic_handler]
fn panic_handler(_info: &PanicInfo) -> ! {
    // No failure word exists on the side channel; the bench reads a run
    // that never broadcasts the pass sentinel as failed.
    loop {
        continue;
    }
}
