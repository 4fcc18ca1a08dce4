// Copyright 2024 CupruxOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Publishes `kernel.ld` to the crate that links the kernel image.
//!
//! `cargo:rustc-link-arg` never leaves this package, so the script is handed
//! over as `links` metadata instead: the image's build script reads
//! `DEP_CUPRUX_BOOT_KERNEL_LD` and passes `-T<path>` itself.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CUPRUX_LINKER_SCRIPT");

    let script = match env::var("CUPRUX_LINKER_SCRIPT") {
        Ok(script) => PathBuf::from(script),
        Err(_) => {
            let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
            manifest_dir.join("kernel.ld")
        }
    };
    println!("cargo:rerun-if-changed={}", script.display());
    // Use canonicalize to ensure only a single absolute path reaches the linker
    let abs_script = script.canonicalize().expect("linker script must exist");

    println!("cargo:KERNEL_LD={}", abs_script.display());
    println!("cargo:rustc-env=CUPRUX_KERNEL_LD={}", abs_script.display());
}
