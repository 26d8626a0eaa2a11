use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct RunArgs {
    #[arg(short, long, env = "CHIRP_ADDRESS", default_value = "127.0.0.1")]
    pub address: String,
    #[arg(short, long, env = "CHIRP_PORT", default_value_t = 8080)]
    pub port: u16,
    /// sea-orm connection url, e.g. `sqlite://chirp.db?mode=rwc`
    #[arg(long, env = "DATABASE_URL")]
    pub db: String,
    /// Database to create and use on MySQL servers
    #[arg(long, env = "CHIRP_DB_NAME", default_value = "chirp")]
    pub db_name: String,
    /// Drop every table and run all migrations again
    #[arg(long, default_value_t = false)]
    pub fresh: bool,
    /// Email of the user the rendered pages are shown for
    #[arg(long, env = "CHIRP_VIEWER_EMAIL", default_value = "alice@example.com")]
    pub viewer_email: String,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Run the web server
    #[default]
    Serve,
    /// Migrate, insert the sample rows and exit
    Seed,
}
