use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use crumb_steg::{files, Decoder, Encoder, TraversalOrder, DEFAULT_BUFFER_SIZE};
use env_logger::Builder;
use log::LevelFilter;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Hide a file in the low bits of a PNG image, or recover it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hide a secret file inside a cover image
    Encode {
        /// Cover image (PNG)
        #[arg(long)]
        input: PathBuf,

        /// Where to write the resulting image (PNG)
        #[arg(long)]
        output: PathBuf,

        /// The secret file to hide
        #[arg(long)]
        secret: PathBuf,

        #[arg(long, value_enum, default_value_t = Order::Row)]
        order: Order,

        /// Bytes read from the secret per refill
        #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
        buffer_size: usize,
    },
    /// Extract everything hidden in an image
    Decode {
        /// Image produced by `encode` (PNG)
        #[arg(long)]
        input: PathBuf,

        /// Where to write the extracted bytes
        #[arg(long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = Order::Row)]
        order: Order,

        /// Bytes collected before each write
        #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
        buffer_size: usize,
    },
}

/// Pixel visiting order, must match between encode and decode
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Order {
    Row,
    Column,
}

impl From<Order> for TraversalOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Row => TraversalOrder::RowMajor,
            Order::Column => TraversalOrder::ColumnMajor,
        }
    }
}

fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logger();

    match Cli::parse().command {
        Commands::Encode {
            input,
            output,
            secret,
            order,
            buffer_size,
        } => {
            let cover = files::open_image(&input)
                .with_context(|| format!("cannot open {}", input.display()))?;
            let mut secret_file = files::open_secret(&secret)
                .with_context(|| format!("cannot open {}", secret.display()))?;
            let mut writer = BufWriter::new(
                File::create(&output)
                    .with_context(|| format!("cannot create {}", output.display()))?,
            );

            Encoder::new(order.into())
                .with_buffer_size(buffer_size)
                .encode(BufReader::new(cover), &mut secret_file, &mut writer)
                .context("encoding failed")?;
            writer.flush()?;
        }
        Commands::Decode {
            input,
            output,
            order,
            buffer_size,
        } => {
            let stego = files::open_image(&input)
                .with_context(|| format!("cannot open {}", input.display()))?;
            let mut writer = BufWriter::new(
                File::create(&output)
                    .with_context(|| format!("cannot create {}", output.display()))?,
            );

            Decoder::new(order.into())
                .with_buffer_size(buffer_size)
                .decode(&mut BufReader::new(stego), &mut writer)
                .context("decoding failed")?;
            writer.flush()?;
        }
    }

    Ok(())
}
