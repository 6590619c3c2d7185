use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = fileutils::cli::parse();
    let code = app::run(args)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
