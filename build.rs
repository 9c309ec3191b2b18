// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Build script for the ir-turret firmware
//!
//! Publishes the RP2350 memory layout to the linker when building for a
//! bare-metal target. Host builds (unit tests of the turret logic) skip the
//! linker setup entirely.
//!
//! # Memory Layout
//! The `memory.x` file defines the RP2350's memory regions:
//! - **FLASH**: 4MB starting at 0x10000000 (program code storage)
//! - **RAM**: 512KB starting at 0x20000000 (runtime data)
//! - **SRAM8**: 4KB starting at 0x20080000 (dedicated memory bank 8)
//! - **SRAM9**: 4KB starting at 0x20081000 (dedicated memory bank 9)
//!
//! `cortex-m-rt` picks the layout up through `-Tlink.x`, which
//! `.cargo/config.toml` adds for the `thumbv8m.main-none-eabihf` target.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Only bare-metal targets link against memory.x
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out.join("memory.x"), include_bytes!("memory.x")).expect("write memory.x");
    println!("cargo:rustc-link-search={}", out.display());
}
