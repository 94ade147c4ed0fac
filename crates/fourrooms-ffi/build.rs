use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let Ok(crate_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set; skipping header generation");
        return;
    };
    let crate_dir = PathBuf::from(crate_dir);

    let config = match cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")) {
        Ok(c) => c,
        Err(e) => {
            println!("cargo:warning=failed to read cbindgen.toml: {e}");
            return;
        }
    };

    let output_dir = crate_dir.join("include");
    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        println!("cargo:warning=failed to create include/: {e}");
        return;
    }

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(output_dir.join("fourrooms.h"));
        }
        Err(e) => println!("cargo:warning=cbindgen failed to generate bindings: {e}"),
    }
}
