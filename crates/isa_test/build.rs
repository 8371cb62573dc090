use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=link.x");

    // Host builds only compile the library; the linker script applies to the
    // bare-metal image alone.
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if arch != "riscv32" {
        return;
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    println!(
        "cargo:rustc-link-arg-bins=-T{}",
        manifest_dir.join("link.x").display()
    );
}
