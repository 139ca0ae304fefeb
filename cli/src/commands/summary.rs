use anyhow::Result;
use loanmap::format_value;

use super::{controller, parse_state};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::SummaryArgs) -> Result<()> {
    let controller = controller(cli, args.category.as_deref())?;
    let atlas = controller.atlas();
    let slice = controller.slice();

    println!("# {}", controller.category());
    match &args.state {
        Some(code) => {
            let state = parse_state(code)?;
            println!("# {}", atlas.state_display_name(&state));
            for county in atlas.counties_in(&state) {
                let name = slice.county_name(&county.id)
                    .or(county.name.as_deref())
                    .unwrap_or("Unknown county");
                println!("{}\t{}\t{}", county.id, name, format_value(slice.county_value(&county.id)));
            }
        }
        None => {
            for state in atlas.states() {
                println!("{}\t{}\t{}", state.id, atlas.state_display_name(&state.id), format_value(slice.state_mean(&state.id)));
            }
        }
    }

    Ok(())
}
