// Publishes the demo page: copies static/ to dist/ and keeps cargo aware of
// the embedded shader sources.
use std::path::Path;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=src/shaders");
    println!("cargo:rerun-if-changed=static");

    // wasm-pack itself is run by the developer:
    //   wasm-pack build --release --target web --out-dir dist/pkg
    let out_dir = Path::new("dist");
    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }
    if let Err(e) = std::fs::create_dir_all(out_dir) {
        println!("cargo:warning=cannot create dist/: {e}");
        return;
    }

    let options = CopyOptions::new().overwrite(true).content_only(true);
    if let Err(e) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=failed to copy static/ to dist/: {e}");
    }
}
