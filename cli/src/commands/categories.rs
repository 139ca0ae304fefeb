use anyhow::Result;

use super::controller;

pub fn run(cli: &crate::cli::Cli) -> Result<()> {
    let controller = controller(cli, None)?;
    for category in controller.categories() {
        println!("{category}");
    }
    Ok(())
}
