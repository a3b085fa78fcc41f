use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = pkgfix::cli::parse();
    app::run(args)
}
