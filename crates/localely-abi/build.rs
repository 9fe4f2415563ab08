fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let map = if std::env::var_os("CARGO_FEATURE_SELF_TEST").is_some() {
        "localely-self-test.map"
    } else {
        "localely.map"
    };
    let version_script = format!("{manifest_dir}/version_scripts/{map}");
    if std::path::Path::new(&version_script).exists()
        && std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("linux")
    {
        println!("cargo:rustc-cdylib-link-arg=-Wl,--version-script={version_script}");
    }
    println!("cargo:rerun-if-changed=version_scripts/localely.map");
    println!("cargo:rerun-if-changed=version_scripts/localely-self-test.map");
}
