use anyhow::Result;
use loanmap::Event;

use super::{controller, parse_state};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./map.svg".into());

    let mut controller = controller(cli, args.category.as_deref())?;
    if let Some(code) = &args.state {
        controller.handle(Event::ClickState(parse_state(code)?))?;
    }

    log::info!("[render] writing {} view of {:?} to {}", controller.view(), controller.category(), out_path.display());
    controller.scene().to_svg(out_path)?;

    Ok(())
}
