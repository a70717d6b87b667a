use clap::Parser;
use locator_forge::cli::commands::{cmd_devices, cmd_extract, cmd_heal, cmd_scaffold, cmd_serve};
use locator_forge::cli::config::{load_config, Cli, Commands};
use locator_forge::session::appium::DEFAULT_ENDPOINT;
use locator_forge::trace::TraceLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve the server endpoint: CLI > config > default
    let endpoint = cli
        .endpoint
        .as_deref()
        .or(config.appium.endpoint.as_deref())
        .unwrap_or(DEFAULT_ENDPOINT);

    let tracer = TraceLogger::new(&config.trace.file);

    match cli.command {
        Commands::Extract {
            page_name,
            input,
            session,
            platform,
            out_dir,
        } => {
            let platform = platform.as_deref().unwrap_or(&config.extract.platform);
            let out_dir = out_dir.as_deref().unwrap_or(&config.extract.out_dir);
            cmd_extract(
                &page_name,
                input.as_deref(),
                session.as_deref(),
                platform,
                out_dir,
                endpoint,
                cli.verbose,
                &tracer,
            )?;
        }
        Commands::Heal {
            locators,
            element,
            input,
            session,
            floor,
        } => {
            let floor = floor.unwrap_or(config.healing.similarity_floor);
            let all_healed = cmd_heal(
                &locators,
                element.as_deref(),
                input.as_deref(),
                session.as_deref(),
                floor,
                endpoint,
                cli.verbose,
                &tracer,
            )?;
            if !all_healed {
                std::process::exit(1);
            }
        }
        Commands::Scaffold { name, dir } => {
            cmd_scaffold(&name, &dir)?;
        }
        Commands::Devices { platform } => {
            cmd_devices(&platform)?;
        }
        Commands::Serve { port } => {
            cmd_serve(port)?;
        }
    }

    Ok(())
}
