use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Reseed the states collection and exit",
        long_about = "Replace the stored collection with the canonical list of US states and territories, then exit without starting the API server."
    )]
    Seed,
}
