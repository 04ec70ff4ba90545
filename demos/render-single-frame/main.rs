#[path = "../common/mod.rs"]
mod common;

/// ```sh
/// cargo run --example render-single-frame
/// ```
pub fn main() {
    common::render_single_frame_demo("render-single-frame", 0)
}
