use clap::{Parser, Subcommand};
use mailsyntax::ValidationOptions;

#[derive(Parser)]
#[command(name = "mailsyntax-cli", about = "Validate email address syntax (RFC 5322 / RFC 5321)")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// write report to file (JSON/NDJSON/CSV selon --format)
    #[arg(long)]
    pub out: Option<String>,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// accepte un domaine sans point (ex. admin@mailserver1)
    #[arg(long)]
    pub allow_tld: bool,

    /// accepte les lettres et chiffres Unicode (local part et domaine)
    #[arg(long)]
    pub international: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    Validate {
        /// adresse e-mail à valider
        email: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn options(&self) -> ValidationOptions {
        ValidationOptions::new()
            .allow_top_level_domains(self.allow_tld)
            .allow_international(self.international)
    }
}
