use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    if target_os == "macos" {
        println!("cargo:rerun-if-changed=resources/macos/Info.plist");

        // Copy the bundle plist next to the build output for `cargo bundle` and dev runs
        let Ok(out_dir) = env::var("OUT_DIR").map(PathBuf::from) else {
            return;
        };
        let Some(target_dir) = out_dir.ancestors().nth(3) else {
            return;
        };

        let resources_src = PathBuf::from("resources/macos");
        let resources_dst = target_dir.join("resources");

        if let Err(e) = fs::create_dir_all(&resources_dst) {
            println!("cargo:warning=Failed to create resources directory: {}", e);
            return;
        }

        let src = resources_src.join("Info.plist");
        if src.exists() {
            if let Err(e) = fs::copy(&src, resources_dst.join("Info.plist")) {
                println!("cargo:warning=Failed to copy Info.plist: {}", e);
            }
        }
    }
}
