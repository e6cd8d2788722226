use clap::{Parser, Subcommand};

// On garde le module local des commandes
mod commands;

use anyhow::Result as AnyResult;

#[derive(Parser)]
#[command(name = "essaim-cli")]
#[command(about = "CLI du moteur d'optimisation par populations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Exécute un ou plusieurs runs à partir d'un fichier de configuration
    Run(commands::run::RunArgs),

    /// Vérifie et assemble une configuration sans l'exécuter
    Validate(commands::run::ValidateArgs),

    /// Analyse un texte de domaine et affiche ses bornes
    Domain(commands::domain::DomainArgs),
}

fn main() -> AnyResult<()> {
    let cli = Cli::parse();

    if let Err(e) = execute_command(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }

    tracing::debug!("Fin de l'exécution du CLI");
    Ok(())
}

fn execute_command(cmd: Commands) -> AnyResult<()> {
    match cmd {
        Commands::Run(args) => commands::run::handle(args),
        Commands::Validate(args) => commands::run::handle_validate(args),
        Commands::Domain(args) => commands::domain::handle(args),
    }
}

// --- TESTS UNITAIRES ---
#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_generation() {
        let output = Cli::command().render_help().to_string();
        assert!(output.contains("essaim-cli"));
        assert!(output.contains("validate"));
    }

    #[test]
    fn test_dispatch_run() {
        let args = vec!["essaim-cli", "run", "--config", "run.json", "--restarts", "4"];
        let cli = Cli::try_parse_from(args).expect("Parsing failed");
        match cli.command {
            Commands::Run(run) => assert_eq!(run.restarts, Some(4)),
            _ => panic!("Le dispatch vers la commande run a échoué"),
        }
    }

    #[test]
    fn test_dispatch_domain() {
        let cli = Cli::try_parse_from(["essaim-cli", "domain", "R(-2, 2)^2"]).unwrap();
        assert!(matches!(cli.command, Commands::Domain(_)));
    }
}
