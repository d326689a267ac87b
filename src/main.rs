// This binary crate is intentionally minimal.
// All neural network logic lives in the library (src/lib.rs and its modules).
// Run the demos with:
//   cargo run --example xor
//   RUST_LOG=info cargo run --example cardio
use log::info;

fn main() {
    env_logger::init();
    info!("synapse-nn {} starting", env!("CARGO_PKG_VERSION"));
    println!("synapse-nn: a node-and-edge feed-forward network engine in Rust.");
    println!("Run `cargo run --example xor` to see the XOR demo.");
}
