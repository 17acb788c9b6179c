use clap::Parser;
use miette::Result;
use sixsigma::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    sixsigma::core::logging::init_logging(global.verbose, global.quiet);

    match cli.command {
        Commands::Eval(args) => sixsigma::cli::commands::eval::run(args, &global),
        Commands::Bulk(args) => sixsigma::cli::commands::bulk::run(args, &global),
        Commands::Init(args) => sixsigma::cli::commands::init::run(args),
        Commands::Config(cmd) => sixsigma::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => sixsigma::cli::commands::completions::run(args),
    }
}
