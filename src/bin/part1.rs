use anyhow::{Context, Result};
use clap::Parser;
use hill_climb::{CLIArgs, Survey};
use log::info;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    hill_climb::logging::init(args.verbose);

    let input = hill_climb::open_input(args.input_path.as_deref())?;
    let Survey {
        mountain,
        start,
        end,
    } = hill_climb::read_survey(input).context("Failed to read height map from given input.")?;

    let min_steps_n = mountain.min_steps_n(&start, &end).with_context(|| {
        format!(
            "There's no path from {} to {} on given height map.",
            start, end
        )
    })?;
    info!(
        "It takes at least {} steps climbing from {} to {}.",
        min_steps_n, start, end
    );

    if args.show_path {
        if let Some(path) = mountain.shortest_path(&[start], &end) {
            hill_climb::print_path(&mountain, &path);
        }
    }

    let mut output = hill_climb::open_output(args.output_path.as_deref())?;
    hill_climb::write_answer(&mut output, min_steps_n)
}
