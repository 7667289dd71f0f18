use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lottery-random")]
#[command(
    about = "True random lottery ticket generator",
    long_about = "lottery-random is a true random lottery ticket generator with the help of the random.org API. \
                  It emails you true random numbers for the configured lottery ticket packs via Azure Communication Services."
)]
#[command(version)]
pub struct Cli {
    /// Only process the named ticket packs (repeatable)
    #[arg(short = 'f', long = "lottery-ticket-pack-filter", num_args = 1..)]
    pub lottery_ticket_pack_filter: Vec<String>,

    /// Config file (JSON, or TOML with a .toml extension)
    #[arg(short, long, env = "LOTTERY_RANDOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the generated packs instead of emailing them
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// `None` when no filter was given, meaning every pack
    pub fn filter(&self) -> Option<&[String]> {
        if self.lottery_ticket_pack_filter.is_empty() {
            None
        } else {
            Some(&self.lottery_ticket_pack_filter)
        }
    }
}
