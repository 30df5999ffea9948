//! Build script to track include_str! dependencies.

fn main() {
    // Sample board shipped inside the library
    println!("cargo:rerun-if-changed=resources/sample_board.json");
}
