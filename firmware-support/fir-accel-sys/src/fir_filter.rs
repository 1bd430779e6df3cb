// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use ufmt::derive::uDebug;

/// Number of coefficient slots exposed by the filter.
pub const TAP_COUNT: usize = 11;

/// Control bit that starts a processing run.
pub const START: u32 = 0x01;
/// Status bit raised when the filter has processed the whole stream.
pub const DONE: u32 = 0x02;
/// Status bit raised when the filter is in its quiescent state.
pub const IDLE: u32 = 0x04;
/// Status bit raised when the input port accepts a sample.
pub const INPUT_READY: u32 = 0x10;
/// Status bit raised when the output port holds a new sample.
pub const OUTPUT_READY: u32 = 0x20;
/// Control bit that marks the next input sample as the last of the stream.
pub const LAST_INPUT: u32 = 0x40;

/// Decoded control/status word of the filter.
#[derive(uDebug, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Status {
    pub input_ready: bool,
    pub output_ready: bool,
    pub done: bool,
    pub idle: bool,
}

impl Status {
    pub fn from_bits(bits: u32) -> Status {
        Status {
            input_ready: bits & INPUT_READY == INPUT_READY,
            output_ready: bits & OUTPUT_READY == OUTPUT_READY,
            done: bits & DONE == DONE,
            idle: bits & IDLE == IDLE,
        }
    }

    /// Both `done` and `idle`: the filter consumed the whole stream and
    /// went back to rest. This is the condition a run is verified against.
    pub fn is_finished(&self) -> bool {
        self.done && self.idle
    }
}

/// Register-level access to a FIR filter instance.
///
/// This is the raw hardware contract: a write to the input port while
/// `input_ready` is clear is dropped by the peripheral, and a read from
/// the output port while `output_ready` is clear yields stale data.
/// Callers must gate the data ports on [`Status`] themselves.
pub trait FilterRegisters {
    fn read_config(&self) -> u32;
    fn write_config(&mut self, value: u32);
    /// Set the number of samples of the upcoming stream. Must be written
    /// before the start bit is asserted.
    fn write_data_length(&mut self, len: u32);
    /// Load one tap coefficient. Must be written before the start bit is
    /// asserted.
    fn write_tap(&mut self, index: usize, value: i32);
    /// Hand one sample to the input port.
    fn push_input(&mut self, sample: i32);
    /// Take one sample from the output port.
    fn pull_output(&mut self) -> i32;

    /// Decode the control/status word. Reads fresh on every call.
    fn read_status(&self) -> Status {
        Status::from_bits(self.read_config())
    }
}

/// Memory mapped FIR filter accelerator. Register layout, relative to the
/// base address:
///   - `0x00`: control/status
///   - `0x10`: data length
///   - `0x20`..=`0x48`: tap coefficients, 4 bytes apart
///   - `0x80`: input sample port (write only)
///   - `0x84`: output sample port (read only)
pub struct FirFilter {
    base_addr: *mut u32,
}

impl FirFilter {
    // Word offsets into the register window.
    const CONFIG: usize = 0x00;
    const DATA_LENGTH: usize = 0x04;
    const TAPS: usize = 0x08;
    const INPUT: usize = 0x20;
    const OUTPUT: usize = 0x21;

    /// Create a new [`FirFilter`] instance given a base address.
    ///
    /// # Safety
    ///
    /// The `base_addr` pointer MUST be a valid pointer that is backed
    /// by a memory mapped FIR filter instance.
    pub unsafe fn new(base_addr: *const ()) -> FirFilter {
        FirFilter {
            base_addr: base_addr as *mut u32,
        }
    }
}

impl FilterRegisters for FirFilter {
    fn read_config(&self) -> u32 {
        unsafe { self.base_addr.add(Self::CONFIG).read_volatile() }
    }

    fn write_config(&mut self, value: u32) {
        unsafe {
            self.base_addr.add(Self::CONFIG).write_volatile(value);
        }
    }

    fn write_data_length(&mut self, len: u32) {
        unsafe {
            self.base_addr.add(Self::DATA_LENGTH).write_volatile(len);
        }
    }

    /// # Panics
    ///
    /// `index` must be below [`TAP_COUNT`].
    fn write_tap(&mut self, index: usize, value: i32) {
        assert!(index < TAP_COUNT);
        unsafe {
            self.base_addr
                .add(Self::TAPS + index)
                .write_volatile(value as u32);
        }
    }

    fn push_input(&mut self, sample: i32) {
        unsafe {
            self.base_addr.add(Self::INPUT).write_volatile(sample as u32);
        }
    }

    fn pull_output(&mut self) -> i32 {
        unsafe { self.base_addr.add(Self::OUTPUT).read_volatile() as i32 }
    }
}

/// Result of one streaming run.
#[derive(uDebug, Debug, Copy, Clone, PartialEq, Eq)]
pub struct StreamOutcome {
    /// All samples went through and the filter reported done and idle
    /// afterwards.
    pub passed: bool,
    pub inputs_pushed: usize,
    pub outputs_pulled: usize,
    /// The poll budget ran out before both counters reached the stream
    /// length.
    pub timed_out: bool,
}

/// Stream `inputs` through the filter and collect the produced samples
/// into `outputs`.
///
/// Configures the filter (data length, then taps), asserts the start bit
/// and polls the status word. Every poll decodes the status once; the
/// input side and the output side advance independently, each gated on
/// its own ready flag, until both have moved `inputs.len()` samples or
/// `poll_budget` polls have been spent. On the final input the
/// last-input flag is raised in the control register right before the
/// sample write.
///
/// # Panics
///
/// `outputs` must hold at least `inputs.len()` samples.
pub fn stream<R: FilterRegisters>(
    regs: &mut R,
    taps: &[i32; TAP_COUNT],
    inputs: &[i32],
    outputs: &mut [i32],
    poll_budget: usize,
) -> StreamOutcome {
    let n = inputs.len();
    assert!(outputs.len() >= n);

    regs.write_data_length(n as u32);
    for (index, tap) in taps.iter().enumerate() {
        regs.write_tap(index, *tap);
    }
    regs.write_config(START);

    let mut pushed = 0;
    let mut pulled = 0;
    let mut polls = 0;
    while (pushed < n || pulled < n) && polls < poll_budget {
        polls += 1;
        let status = regs.read_status();
        if status.input_ready && pushed < n {
            if pushed == n - 1 {
                // Mark the final sample before it goes out.
                let config = regs.read_config();
                regs.write_config(config | LAST_INPUT);
            }
            regs.push_input(inputs[pushed]);
            pushed += 1;
        }
        if status.output_ready && pulled < n {
            outputs[pulled] = regs.pull_output();
            pulled += 1;
        }
    }

    let timed_out = pushed < n || pulled < n;
    let finished = regs.read_status().is_finished();
    StreamOutcome {
        passed: !timed_out && finished,
        inputs_pushed: pushed,
        outputs_pulled: pulled,
        timed_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A register window backed by plain memory, wide enough for the
    // whole 0x00..=0x84 span.
    const WINDOW_WORDS: usize = 0x22;

    #[test]
    fn writes_land_on_the_documented_offsets() {
        let mut window = [0u32; WINDOW_WORDS];
        let mut filter = unsafe { FirFilter::new(window.as_mut_ptr() as *const ()) };

        filter.write_config(START);
        filter.write_data_length(10);
        filter.write_tap(0, -10);
        filter.write_tap(10, 7);
        filter.push_input(-3);

        assert_eq!(window[0x00], START);
        assert_eq!(window[0x10 / 4], 10);
        assert_eq!(window[0x20 / 4], -10i32 as u32);
        assert_eq!(window[0x48 / 4], 7);
        assert_eq!(window[0x80 / 4], -3i32 as u32);
    }

    #[test]
    fn output_port_reads_the_word_at_0x84() {
        let mut window = [0u32; WINDOW_WORDS];
        window[0x84 / 4] = 915;
        let mut filter = unsafe { FirFilter::new(window.as_mut_ptr() as *const ()) };

        assert_eq!(filter.pull_output(), 915);
    }

    #[test]
    #[should_panic]
    fn tap_index_out_of_range_panics() {
        let mut window = [0u32; WINDOW_WORDS];
        let mut filter = unsafe { FirFilter::new(window.as_mut_ptr() as *const ()) };

        filter.write_tap(TAP_COUNT, 0);
    }

    #[test]
    fn status_decodes_each_bit() {
        let status = Status::from_bits(INPUT_READY | DONE);
        assert!(status.input_ready);
        assert!(!status.output_ready);
        assert!(status.done);
        assert!(!status.idle);

        let status = Status::from_bits(OUTPUT_READY | IDLE);
        assert!(!status.input_ready);
        assert!(status.output_ready);
        assert!(!status.done);
        assert!(status.idle);
    }

    #[test]
    fn finished_needs_done_and_idle() {
        assert!(Status::from_bits(DONE | IDLE).is_finished());
        assert!(!Status::from_bits(DONE).is_finished());
        assert!(!Status::from_bits(IDLE).is_finished());
        assert!(Status::from_bits(DONE | IDLE | INPUT_READY).is_finished());
    }
}
