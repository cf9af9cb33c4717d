#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    bionexas::native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build starts through `bionexas::web::start` instead.
}
