use clap::Parser;
use miette::Result;
use keyfit::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    keyfit::cli::logging::init(&cli.global)?;

    match cli.command {
        Commands::Fit(args) => commands::fit::run(args, &cli.global),
        Commands::Key(args) => commands::key::run(args, &cli.global),
        Commands::Keys(args) => commands::keys::run(args, &cli.global),
        Commands::Params(args) => commands::params::run(args, &cli.global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
