//! A binary that converts a chain file into PAF records.
//!
//! ```shell
//! cargo run --release --bin=chain2paf --features=binaries hg19ToHg38.over.chain.gz
//! ```
//!
//! The location may be a local path or an `http(s)://` URL. One PAF line is
//! written to standard output for each chain that produced alignment data.
//! Logs are written to standard error.

use std::io;
use std::io::BufWriter;
use std::io::Write as _;

use anyhow::Context;
use anyhow::Result;
use chainpaf::convert;
use chainpaf::convert::TrailingChain;
use chainpaf::decode::MAX_DECODED_SIZE;
use chainpaf::loader::Loader;
use chainpaf::loader::Local;
use chainpaf::location::Location;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Loading
////////////////////////////////////////////////////////////////////////////////////////

/// A [`Loader`] that fetches URLs over HTTP(S) and reads paths from the local
/// filesystem.
struct Remote {
    /// The HTTP client.
    client: reqwest::blocking::Client,

    /// An optional bearer token sent with every request.
    token: Option<String>,
}

impl Remote {
    /// Creates a new [`Remote`] loader.
    fn new(token: Option<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            token,
        }
    }
}

impl Loader for Remote {
    fn load(&self, location: &Location) -> io::Result<Vec<u8>> {
        let Some(url) = location.as_url() else {
            return Local.load(location);
        };

        info!("downloading {url}");

        let mut request = self.client.get(url);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let bytes = request
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map_err(io::Error::other)?;

        info!("download completed ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Converts a chain file into PAF records.
#[derive(Parser)]
struct Args {
    /// The location of the chain file (a local path or an `http(s)://` URL).
    /// Gzip-compressed files are detected automatically.
    location: Location,

    /// A bearer token to send when fetching a URL.
    #[arg(short, long)]
    token: Option<String>,

    /// The maximum size of the decoded chain file (in bytes).
    #[arg(short, long, default_value_t = MAX_DECODED_SIZE)]
    max_size: usize,

    /// Drops the final chain in the file, matching the output of converters
    /// that never emitted it.
    #[arg(long, default_value_t = false)]
    legacy_drop_last: bool,

    #[command(flatten)]
    verbose: Verbosity,
}

fn run(args: Args) -> Result<()> {
    let trailing_chain = if args.legacy_drop_last {
        TrailingChain::Drop
    } else {
        TrailingChain::Emit
    };

    let converter = convert::Builder::default()
        .max_decoded_size(args.max_size)
        .trailing_chain(trailing_chain)
        .build();

    let loader = Remote::new(args.token);
    let records = converter
        .load(&loader, &args.location)
        .context("converting chain file")?;

    info!("converted {} chains", records.len());

    let mut writer = BufWriter::new(io::stdout().lock());

    for record in &records {
        writeln!(writer, "{record}").context("writing PAF record")?;
    }

    writer.flush().context("flushing output")?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .with_writer(io::stderr)
            .init(),
    };

    run(args)
}
