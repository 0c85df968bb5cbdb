use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};

use ykcrypt::api::{CryptConfig, HashKind, InputSource, ObjectId, OperationKind, OutputSink, Secret};

#[derive(Parser, Debug)]
#[command(name = "ykcrypt")]
#[command(about = "Sign or decipher data with a private key on a YubiKey", version)]
#[command(group(ArgGroup::new("operation").required(true).args(["sign", "decipher"])))]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Perform digital signature operation
    #[arg(short, long)]
    pub sign: bool,

    /// Decipher operation
    #[arg(short = 'c', long)]
    pub decipher: bool,

    /// Selects the private key ID to use, in hex (first key on the card if omitted)
    #[arg(short, long, value_name = "ID")]
    pub key: Option<ObjectId>,

    /// Uses reader number <N>
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub reader: usize,

    /// Selects the input file to use ('-' for standard input)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Outputs to file <PATH> ('-' for hex on standard output)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Input file is a SHA-1 hash
    #[arg(long = "sha-1", conflicts_with = "sha256")]
    pub sha1: bool,

    /// Input file is a SHA-256 hash
    #[arg(long = "sha-256")]
    pub sha256: bool,

    /// PIN code, prompted for when not given
    #[arg(short, long, env = "YKCRYPT_PIN", hide_env_values = true)]
    pub pin: Option<String>,
}

impl Cli {
    fn into_config(self) -> CryptConfig {
        let operation = if self.sign {
            OperationKind::Sign
        } else {
            OperationKind::Decipher
        };
        let hash = if self.sha1 {
            HashKind::Sha1
        } else if self.sha256 {
            HashKind::Sha256
        } else {
            HashKind::Raw
        };

        let mut config = CryptConfig::new(operation);
        config.device = self.reader;
        config.key_id = self.key;
        config.pin = self.pin.map(Secret::from);
        config.hash = hash;
        config.input = self.input.map(InputSource::from_arg);
        config.output = self.output.map(OutputSink::from_arg);
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = cli.verbosity.tracing_level_filter();

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match ykcrypt::run(cli.into_config()) {
        Ok(output) => {
            debug!("Wrote {} bytes", output.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            // -qqq turns the subscriber off
            if level == LevelFilter::OFF {
                eprintln!("Error: {}", e);
            } else {
                error!("{}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
