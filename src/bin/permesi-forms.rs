#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    let action = permesi_forms::cli::start()?;

    if !action.execute()? {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
