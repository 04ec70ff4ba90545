#[path = "../common/mod.rs"]
mod common;

/// ```sh
/// cargo run --example render-quartic-sweep
/// ```
pub fn main() {
    common::render_sweep_demo("render-quartic-sweep")
}
