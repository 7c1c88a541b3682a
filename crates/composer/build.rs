//! Build script for compiling protobuf definitions into Rust code

#[cfg(feature = "grpc-server")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    let well_known = protoc_bin_vendored::include_path()?;

    tonic_build::configure().compile(
        &["proto/credentialcomposer.proto", "proto/config.proto"],
        &[std::path::PathBuf::from("proto"), well_known],
    )?;
    Ok(())
}

#[cfg(not(feature = "grpc-server"))]
fn main() {
    // No-op when grpc-server feature is not enabled
}
