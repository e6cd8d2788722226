use anyhow::{Context, Result as AnyResult};
use clap::Args;
use essaim::types::Domain;

/// Analyse d'un texte de domaine
#[derive(Args, Clone, Debug)]
pub struct DomainArgs {
    /// Texte du domaine, ex: "R(-5.12, 5.12)^10"
    pub text: String,
}

/// Une ligne par dimension : `indice  [lower, upper)`.
pub fn describe(text: &str) -> AnyResult<Vec<String>> {
    let domain = Domain::parse(text).with_context(|| format!("Domaine '{}'", text))?;
    Ok((0..domain.dimension())
        .filter_map(|i| domain.bounds(i).map(|(l, u)| format!("{:>3}  [{}, {})", i, l, u)))
        .collect())
}

pub fn handle(args: DomainArgs) -> AnyResult<()> {
    let lines = describe(&args.text)?;
    println!("Domaine {} ({} dimension(s))", args.text, lines.len());
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
