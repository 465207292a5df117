use anyhow::Result;
use icpscore::cli::{configure_thread_pool, init_tracing, parse_args, Commands};
use icpscore::commands::{self, GlobalOptions, Session};
use icpscore::pipeline::Stage;

fn main() -> Result<()> {
    let cli = parse_args();

    init_tracing(cli.verbosity, cli.quiet, cli.plain);
    configure_thread_pool(cli.jobs);

    let options = GlobalOptions {
        verbosity: cli.verbosity,
        quiet: cli.quiet,
        plain: cli.plain,
        config: cli.config.clone(),
    };

    match cli.command {
        Commands::Init { force } => commands::init_config(force),
        Commands::Urgency {
            input,
            output,
            options: stage_options,
        } => commands::handle_stage(
            &Session::load(&options)?,
            Stage::Urgency,
            input,
            output,
            &stage_options,
        ),
        Commands::Fit {
            input,
            output,
            options: stage_options,
        } => commands::handle_stage(
            &Session::load(&options)?,
            Stage::Fit,
            input,
            output,
            &stage_options,
        ),
        Commands::Vertical {
            input,
            output,
            options: stage_options,
        } => commands::handle_stage(
            &Session::load(&options)?,
            Stage::Vertical,
            input,
            output,
            &stage_options,
        ),
        Commands::Run {
            data_dir,
            options: stage_options,
        } => commands::handle_run(&Session::load(&options)?, data_dir, &stage_options),
        Commands::Explain {
            text,
            page_category,
            category,
        } => commands::handle_explain(
            &Session::load(&options)?,
            &text,
            page_category.as_deref(),
            category,
        ),
        Commands::Patterns { category } => {
            commands::handle_patterns(&Session::load(&options)?, category)
        }
    }
}
