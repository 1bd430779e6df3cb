// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

#![no_std]

pub mod fir_filter;
pub mod gpio;
pub mod test_signal;
